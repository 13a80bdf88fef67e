/// Response envelopes handed to the transport layer
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::pagination::{PaginatedResult, PaginationEnvelope};
use crate::shared::errors::{AppError, AppResult};
use crate::{log_error, log_warn};

const GENERIC_FAILURE_MESSAGE: &str = "An internal error occurred while processing the request";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEnvelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationEnvelope>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureEnvelope {
    pub success: bool,
    pub error: ErrorBody,
    pub timestamp: DateTime<Utc>,
}

/// Either envelope, serialized without an extra wrapper
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Success(SuccessEnvelope<T>),
    Failure(FailureEnvelope),
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse::Success(SuccessEnvelope {
            success: true,
            data,
            pagination: None,
            timestamp: Utc::now(),
        })
    }

    pub fn paginated(result: PaginatedResult<T>) -> ApiResponse<Vec<T>> {
        ApiResponse::Success(SuccessEnvelope {
            success: true,
            data: result.items,
            pagination: Some(result.pagination),
            timestamp: Utc::now(),
        })
    }

    pub fn error(error: &AppError) -> Self {
        ApiResponse::Failure(FailureEnvelope {
            success: false,
            error: ErrorBody::from(error),
            timestamp: Utc::now(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Success(envelope) => Some(&envelope.data),
            ApiResponse::Failure(_) => None,
        }
    }

    pub fn pagination(&self) -> Option<&PaginationEnvelope> {
        match self {
            ApiResponse::Success(envelope) => envelope.pagination.as_ref(),
            ApiResponse::Failure(_) => None,
        }
    }

    pub fn error_body(&self) -> Option<&ErrorBody> {
        match self {
            ApiResponse::Success(_) => None,
            ApiResponse::Failure(envelope) => Some(&envelope.error),
        }
    }
}

/// Wrap a handler result, logging failures by severity
pub fn respond<T>(operation: &str, result: AppResult<T>) -> ApiResponse<T> {
    match result {
        Ok(data) => ApiResponse::ok(data),
        Err(e) => {
            report(operation, &e);
            ApiResponse::error(&e)
        }
    }
}

pub fn respond_paged<T>(operation: &str, result: AppResult<PaginatedResult<T>>) -> ApiResponse<Vec<T>> {
    match result {
        Ok(page) => ApiResponse::<T>::paginated(page),
        Err(e) => {
            report(operation, &e);
            ApiResponse::error(&e)
        }
    }
}

fn report(operation: &str, error: &AppError) {
    if error.is_client_error() {
        log_warn!("{} rejected: {}", operation, error);
    } else {
        log_error!("{} failed: {}", operation, error);
    }
}

impl From<&AppError> for ErrorBody {
    fn from(error: &AppError) -> Self {
        match error {
            AppError::InvalidParameter {
                parameter,
                message,
                valid_codes,
            } => {
                let details = if valid_codes.is_empty() {
                    serde_json::json!({ "parameter": parameter })
                } else {
                    serde_json::json!({ "parameter": parameter, "validCodes": valid_codes })
                };
                ErrorBody {
                    code: error.code().to_string(),
                    message: format!("Invalid value for '{}': {}", parameter, message),
                    details: Some(details),
                }
            }
            AppError::NotFound(message) => ErrorBody {
                code: error.code().to_string(),
                message: message.clone(),
                details: None,
            },
            // Server-side detail stays in the logs
            AppError::StoreFailure(_) | AppError::ConfigError(_) | AppError::InternalError(_) => {
                ErrorBody {
                    code: error.code().to_string(),
                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                    details: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_failure_hides_detail() {
        let response: ApiResponse<()> =
            ApiResponse::error(&AppError::StoreFailure("database is locked".to_string()));
        let body = response.error_body().cloned().unwrap();
        assert_eq!(body.code, "STORE_FAILURE");
        assert!(!body.message.contains("locked"));
        assert!(body.details.is_none());
    }

    #[test]
    fn test_invalid_parameter_names_parameter() {
        let response: ApiResponse<()> =
            ApiResponse::error(&AppError::invalid_parameter("gender", "must be 'M' or 'F'"));
        let body = response.error_body().cloned().unwrap();
        assert_eq!(body.code, "INVALID_PARAMETER");
        assert!(body.message.contains("gender"));
        assert_eq!(body.details, Some(serde_json::json!({ "parameter": "gender" })));
    }

    #[test]
    fn test_invalid_choice_lists_valid_codes() {
        let response: ApiResponse<()> = ApiResponse::error(&AppError::invalid_choice(
            "ageGroup",
            "'U9' is not a valid age group",
            &["U8", "U10"],
        ));
        let body = response.error_body().cloned().unwrap();
        assert_eq!(
            body.details,
            Some(serde_json::json!({ "parameter": "ageGroup", "validCodes": ["U8", "U10"] }))
        );
    }

    #[test]
    fn test_success_serialization_shape() {
        let response = ApiResponse::ok(vec![1, 2, 3]);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert!(json.get("pagination").is_none());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_paginated_serialization_shape() {
        let params = crate::shared::application::PaginationParams::new(0, 2);
        let result = PaginatedResult::new(vec!["a", "b"], 5, &params);
        let response = ApiResponse::paginated(result);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["pagination"]["totalItems"], 5);
        assert_eq!(json["pagination"]["totalPages"], 3);
        assert_eq!(json["pagination"]["hasNext"], true);
    }
}
