//! `CommandResponse`: the single sum-typed result every command-layer
//! operation returns, on both the CLI and JSON-RPC paths.

use crate::models::error::DeviceError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CommandResponse {
    Ok { data: serde_json::Value },
    Error { message: String },
}

impl CommandResponse {
    pub fn ok(data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Self::Ok { data },
            Err(err) => Self::Error {
                message: format!("failed to serialize response: {err}"),
            },
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

impl From<DeviceError> for CommandResponse {
    fn from(err: DeviceError) -> Self {
        Self::Error {
            message: err.user_friendly_message(),
        }
    }
}

impl From<anyhow::Error> for CommandResponse {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DeviceError>() {
            Ok(device_err) => device_err.into(),
            Err(err) => Self::Error {
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_serializes_with_status_field() {
        let response = CommandResponse::ok(serde_json::json!({"devices": []}));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["data"]["devices"], serde_json::json!([]));
    }

    #[test]
    fn error_carries_message() {
        let response = CommandResponse::error("boom");
        assert!(!response.is_ok());
    }
}
