use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeasonsError {
    #[error("Hunting season file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read hunting season file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: expected at least species and hunting dates")]
    MalformedLine { line: usize },
}

impl SeasonsError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "The hunting season data file was not found.",
            Self::Io(_) => "The hunting season data file could not be read.",
            Self::MalformedLine { .. } => "The hunting season data file is malformed.",
        }
    }
}

pub type Result<T> = std::result::Result<T, SeasonsError>;
