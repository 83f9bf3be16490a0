use almanac_core::{AppError, ReportError};

use crate::error::SeasonsError;

impl From<SeasonsError> for AppError {
    fn from(e: SeasonsError) -> Self {
        match e {
            SeasonsError::NotFound(path) => {
                AppError::Report(ReportError::DataFileNotFound(path.display().to_string()))
            }
            SeasonsError::Io(e) => AppError::Io(e),
            e @ SeasonsError::MalformedLine { .. } => {
                AppError::Report(ReportError::MalformedData(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_line_keeps_line_number() {
        let app: AppError = SeasonsError::MalformedLine { line: 7 }.into();
        assert!(app.to_string().contains("Line 7"));
        assert_eq!(app.user_message(), "The data file could not be parsed.");
    }

    #[test]
    fn test_not_found() {
        let app: AppError = SeasonsError::NotFound("Config/hunting.txt".into()).into();
        assert!(matches!(app, AppError::Report(ReportError::DataFileNotFound(_))));
    }
}
