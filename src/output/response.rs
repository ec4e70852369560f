//! CLI response formatting and output.
//!
//! Provides JSON envelope, printing, and exit code mapping.

use packid::error::Hint;
use packid::{Error, ErrorCode, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
                retryable: err.retryable,
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) {
    use std::io::{self, Write};

    let payload = serde_json::to_string_pretty(response)
        .unwrap_or_else(|_| "{\"success\":false}".to_string());
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    // BrokenPipe means the consumer went away; exit quietly either way.
    let _ = writeln!(handle, "{}", payload);
}

pub fn print_json_result(result: Result<serde_json::Value>) {
    match result {
        Ok(data) => print_response(&CliResponse::success(data)),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<serde_json::Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ValidationMissingArgument | ErrorCode::ValidationInvalidArgument => 2,

        ErrorCode::RecipeNameNotFound => 3,

        ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError
        | ErrorCode::InternalUnexpected => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_has_no_error() {
        let response = CliResponse::success(serde_json::json!({"version": "1.2.3"}));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn error_result_maps_to_class_exit_code() {
        let err = Error::recipe_name_not_found("conanfile.py");
        let (result, code) = map_cmd_result_to_json::<serde_json::Value>(Err(err));
        assert!(result.is_err());
        assert_eq!(code, 3);
    }

    #[test]
    fn error_response_carries_code_string() {
        let err = Error::validation_invalid_argument("shell", "unknown shell", None);
        let response = CliResponse::<()>::from_error(&err);
        assert_eq!(response.error.unwrap().code, "validation.invalid_argument");
    }
}
