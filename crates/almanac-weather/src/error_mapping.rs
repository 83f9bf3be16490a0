use almanac_core::{AppError, ReportError};

use crate::error::{ParseError, ProviderError};

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::MissingApiKey(provider) => {
                AppError::Report(ReportError::MissingApiKey(provider.to_string()))
            }
            ProviderError::InvalidRequest(s) => AppError::Report(ReportError::InvalidRequest(s)),
            ProviderError::Network(e) => AppError::Network(e),
            ProviderError::Parse(e) => AppError::Report(ReportError::InvalidResponse(e.to_string())),
        }
    }
}

impl From<ParseError> for AppError {
    fn from(e: ParseError) -> Self {
        AppError::Report(ReportError::InvalidResponse(e.to_string()))
    }
}
