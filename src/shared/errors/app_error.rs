use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Invalid parameter '{parameter}': {message}")]
    InvalidParameter {
        parameter: String,
        message: String,
        /// Accepted values, reported to the caller when the parameter is a closed set
        valid_codes: Vec<String>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store failure: {0}")]
    StoreFailure(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
            valid_codes: Vec::new(),
        }
    }

    pub fn invalid_choice(
        parameter: impl Into<String>,
        message: impl Into<String>,
        valid_codes: &[&str],
    ) -> Self {
        AppError::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
            valid_codes: valid_codes.iter().map(|code| code.to_string()).collect(),
        }
    }

    /// Stable machine-readable code used in failure envelopes
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidParameter { .. } => "INVALID_PARAMETER",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::StoreFailure(_) => "STORE_FAILURE",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            AppError::InvalidParameter { .. } => 400,
            AppError::NotFound(_) => 404,
            AppError::StoreFailure(_) | AppError::ConfigError(_) | AppError::InternalError(_) => {
                500
            }
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.http_status() < 500
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => {
                AppError::NotFound("Record not found in store".to_string())
            }
            _ => AppError::StoreFailure(err.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for AppError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        AppError::StoreFailure(format!("Connection pool error: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("Background task failed: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("Serialization error: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_statuses() {
        let invalid = AppError::invalid_parameter("gender", "must be M or F");
        assert_eq!(invalid.code(), "INVALID_PARAMETER");
        assert_eq!(invalid.http_status(), 400);
        assert!(invalid.is_client_error());

        let missing = AppError::NotFound("player 1".to_string());
        assert_eq!(missing.code(), "NOT_FOUND");
        assert_eq!(missing.http_status(), 404);

        let store = AppError::StoreFailure("disk I/O error".to_string());
        assert_eq!(store.http_status(), 500);
        assert!(!store.is_client_error());
    }

    #[test]
    fn test_diesel_not_found_maps_to_not_found() {
        let err: AppError = diesel::result::Error::NotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError = diesel::result::Error::RollbackTransaction.into();
        assert!(matches!(err, AppError::StoreFailure(_)));
    }

    #[test]
    fn test_invalid_choice_keeps_codes() {
        let err = AppError::invalid_choice("ageGroup", "unknown group", &["U8", "S70"]);
        match err {
            AppError::InvalidParameter { valid_codes, .. } => {
                assert_eq!(valid_codes, vec!["U8".to_string(), "S70".to_string()])
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(matches!(
            AppError::invalid_parameter("q", "blank"),
            AppError::InvalidParameter { ref valid_codes, .. } if valid_codes.is_empty()
        ));
    }

    #[test]
    fn test_display_names_parameter() {
        let err = AppError::invalid_parameter("minRating", "must be a non-negative integer");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'minRating': must be a non-negative integer"
        );
    }
}
