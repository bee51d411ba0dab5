//! Module for reading whitespace separated data files, such as graph edge lists
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use log::{debug, warn};

use crate::configuration::Configuration;
use crate::io::IoError;

/// Data files published alongside apx
pub const KNOWN_FILES: [&str; 9] = [
    "routes.txt",
    "petersen.txt",
    "petersenstar.txt",
    "star.txt",
    "clique.txt",
    "cycles.txt",
    "lotr.txt",
    "karate.txt",
    "noisybiclique.txt",
];

/// Lazily read data file, yielding the whitespace separated tokens of each line
///
/// Lines which are empty (or only whitespace) are skipped. Iterating a second time
/// requires opening the file again.
///
/// # Examples
/// ```rust
/// use std::path::PathBuf;
/// use apx_core::io::data_file::DataFile;
/// let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
///     .join("test_data")
///     .join("fellowship.txt");
/// for tokens in DataFile::from_path(path).unwrap() {
///     let tokens = tokens.unwrap();
///     assert!(!tokens.is_empty());
/// }
/// ```
pub struct DataFile {
    lines: Lines<BufReader<File>>,
}

impl DataFile {
    /// Open `filename` from the configured data directory
    ///
    /// If the file isn't present and the `fetch` feature is enabled, it is first
    /// downloaded from the configured url prefix.
    pub fn open(filename: &str) -> Result<Self, IoError> {
        let configuration = Configuration::current();
        let path = configuration.data_directory.join(filename);
        if !path.is_file() {
            if let Err(err) = fetch(&configuration, filename, &path) {
                warn!("{}", err);
            }
        }
        if !path.is_file() {
            return Err(IoError::UnknownFile {
                filename: filename.to_string(),
                known: KNOWN_FILES.join(", "),
            });
        }
        Self::from_path(path)
    }

    /// Open an arbitrary file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, IoError> {
        debug!("Opening data file {}", path.as_ref().display());
        let file = File::open(path)?;
        Ok(DataFile {
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Iterator for DataFile {
    type Item = Result<Vec<String>, IoError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(err.into())),
            };
            if line.trim().is_empty() {
                continue;
            }
            return Some(Ok(line.split_whitespace().map(String::from).collect()));
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "fetch")] {
        /// Download `filename` into the data directory
        fn fetch(configuration: &Configuration, filename: &str, destination: &Path) -> Result<(), IoError> {
            std::fs::create_dir_all(&configuration.data_directory)?;
            let url = format!("{}{}", configuration.url_prefix, filename);
            log::info!("Downloading {} to {}", url, destination.display());
            let response = reqwest::blocking::get(&url)
                .and_then(|response| response.error_for_status())
                .map_err(|e| IoError::Fetch(format!("{}: {}", url, e)))?;
            let body = response
                .bytes()
                .map_err(|e| IoError::Fetch(format!("{}: {}", url, e)))?;
            std::fs::write(destination, &body)?;
            Ok(())
        }
    } else {
        fn fetch(_configuration: &Configuration, filename: &str, _destination: &Path) -> Result<(), IoError> {
            Err(IoError::Fetch(format!(
                "{} (downloading requires the fetch feature)",
                filename
            )))
        }
    }
}
