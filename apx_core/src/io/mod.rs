//! Module for reading and writing linear programs and their input data
pub mod data_file;
pub mod expression;
pub mod json;

use thiserror::Error;

/// Errors raised while locating or reading data files
#[derive(Error, Debug)]
pub enum IoError {
    /// The file is neither available locally nor could it be fetched
    #[error("Unknown file: {filename}\nKnown files: {known}")]
    UnknownFile { filename: String, known: String },
    /// Downloading the file failed
    #[error("Unable to fetch {0}")]
    Fetch(String),
    #[error("Unable to read file")]
    Read(#[from] std::io::Error),
}
