use regex::Regex;

use crate::shared::errors::{AppError, AppResult};

const FEDERATION_PATTERN: &str = r"^[A-Z]{2,3}$";

pub struct Validator;

impl Validator {
    /// Treat absent, empty and whitespace-only values alike
    pub fn present(value: Option<&str>) -> Option<&str> {
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn require_text<'a>(parameter: &str, value: Option<&'a str>) -> AppResult<&'a str> {
        Self::present(value).ok_or_else(|| {
            AppError::invalid_parameter(parameter, "is required and cannot be empty")
        })
    }

    /// Parse a non-negative integer bound such as `minRating`
    pub fn parse_non_negative(parameter: &str, value: &str) -> AppResult<u32> {
        value.trim().parse::<u32>().map_err(|_| {
            AppError::invalid_parameter(
                parameter,
                format!("'{}' is not a non-negative integer", value),
            )
        })
    }

    pub fn parse_optional_non_negative(
        parameter: &str,
        value: Option<&str>,
    ) -> AppResult<Option<u32>> {
        Self::present(value)
            .map(|v| Self::parse_non_negative(parameter, v))
            .transpose()
    }

    /// Parse a boolean flag; absent means `default`
    pub fn parse_flag(parameter: &str, value: Option<&str>, default: bool) -> AppResult<bool> {
        match Self::present(value) {
            None => Ok(default),
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(AppError::invalid_parameter(
                    parameter,
                    format!("'{}' is not a boolean (expected true or false)", v),
                )),
            },
        }
    }

    /// Uppercase a federation code and check it is two or three letters
    pub fn normalize_federation(parameter: &str, value: &str) -> AppResult<String> {
        let code = value.trim().to_uppercase();
        let re = Regex::new(FEDERATION_PATTERN)
            .map_err(|e| AppError::InternalError(format!("Invalid federation pattern: {}", e)))?;
        if !re.is_match(&code) {
            return Err(AppError::invalid_parameter(
                parameter,
                format!("'{}' is not a 2-3 letter federation code", value),
            ));
        }
        Ok(code)
    }
}
