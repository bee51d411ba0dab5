use std::path::PathBuf;
use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

#[derive(Debug, Clone)]
pub struct Configuration {
    /// Feasibility and optimality tolerance handed to the solver
    pub tolerance: f64,
    /// Iteration limit handed to the solver
    pub max_iter: u32,
    /// Whether the solver should print its progress
    pub verbose: bool,
    pub solver: Solver,
    /// Directory where data files are looked up (and downloaded to)
    pub data_directory: PathBuf,
    /// Location data files are fetched from when missing locally
    pub url_prefix: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            tolerance: 1e-8,
            max_iter: 200,
            verbose: false,
            solver: Solver::Clarabel,
            data_directory: PathBuf::from("data"),
            url_prefix: String::from("https://raw.githubusercontent.com/rasmus-pagh/apx/main/data/"),
        }
    }
}

impl Configuration {
    /// Snapshot of the current global configuration
    ///
    /// A poisoned lock still holds a usable configuration, so its contents are used as is.
    pub fn current() -> Configuration {
        match CONFIGURATION.read() {
            Ok(configuration) => configuration.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Apply `update` to the global configuration
    pub fn update<F: FnOnce(&mut Configuration)>(update: F) {
        match CONFIGURATION.write() {
            Ok(mut configuration) => update(&mut configuration),
            Err(poisoned) => update(&mut poisoned.into_inner()),
        }
    }
}

/// Enum used to specify the default solver to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    /// Use the Clarabel interior point solver
    Clarabel,
    /// Use the microlp simplex solver, requires the minilp feature to be enabled
    Microlp,
    /// Use the HiGHS solver, requires the highs feature to be enabled
    Highs,
}
