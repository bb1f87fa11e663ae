//! Error types
//!
//! `DeviceError` is the closed set of domain error kinds the core returns.
//! Every variant maps to exactly one JSON-RPC error code at the server
//! boundary (see `kind()` / `rpc_code()`), and to a single `{status:error}`
//! command response on the CLI path.

use thiserror::Error;

/// The coarse error category used for JSON-RPC code mapping and for
/// `Precondition`-style gating (e.g. refusing input on an offline device).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Precondition,
    External,
    Timeout,
    Unavailable,
    Protocol,
}

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("Device not found: {name}")]
    NotFound { name: String },

    #[error("App not found: {bundle_id}")]
    AppNotFound { bundle_id: String },

    #[error("AVD not found: {name}")]
    AvdNotFound { name: String },

    #[error("Device {name} is already running")]
    AlreadyRunning { name: String },

    #[error("Device {name} is not running")]
    NotRunning { name: String },

    #[error("{message}")]
    InvalidArgument { message: String },

    #[error("Device {name} is offline: {detail}")]
    DeviceOffline { name: String, detail: String },

    #[error("{message}")]
    Precondition { message: String },

    #[error("Failed to start device {name}: {reason}")]
    StartFailed { name: String, reason: String },

    #[error("Failed to stop device {name}: {reason}")]
    StopFailed { name: String, reason: String },

    #[error("Failed to create device {name}: {reason}")]
    CreateFailed { name: String, reason: String },

    #[error("Failed to delete device {name}: {reason}")]
    DeleteFailed { name: String, reason: String },

    #[error("Command failed: {command}: {detail}")]
    CommandFailed { command: String, detail: String },

    #[error("Platform not supported: {platform}")]
    PlatformNotSupported { platform: String },

    #[error("SDK not found: {sdk}")]
    SdkNotFound { sdk: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Timed out waiting for {operation} after {seconds}s")]
    Timeout { operation: String, seconds: u64 },

    #[error("{resource} unavailable: {reason}")]
    Unavailable { resource: String, reason: String },

    #[error("Invalid JSON-RPC request: {message}")]
    Protocol { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Other error: {message}")]
    Other { message: String },
}

impl DeviceError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn app_not_found(bundle_id: impl Into<String>) -> Self {
        Self::AppNotFound {
            bundle_id: bundle_id.into(),
        }
    }

    pub fn already_running(name: impl Into<String>) -> Self {
        Self::AlreadyRunning { name: name.into() }
    }

    pub fn not_running(name: impl Into<String>) -> Self {
        Self::NotRunning { name: name.into() }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn device_offline(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::DeviceOffline {
            name: name.into(),
            detail: detail.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    pub fn start_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StartFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn stop_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StopFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn command_failed(command: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            detail: detail.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>, seconds: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            seconds,
        }
    }

    pub fn unavailable(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Coarse category used to pick a JSON-RPC error code and to decide
    /// whether an operation should be gated (e.g. `Precondition` on an
    /// offline device refuses everything but `boot` and metadata reads).
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::NotFound { .. } | Self::AppNotFound { .. } | Self::AvdNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::AlreadyRunning { .. }
            | Self::NotRunning { .. }
            | Self::DeviceOffline { .. }
            | Self::Precondition { .. } => ErrorKind::Precondition,
            Self::StartFailed { .. }
            | Self::StopFailed { .. }
            | Self::CreateFailed { .. }
            | Self::DeleteFailed { .. }
            | Self::CommandFailed { .. }
            | Self::PlatformNotSupported { .. }
            | Self::SdkNotFound { .. } => ErrorKind::External,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Unavailable { .. } => ErrorKind::Unavailable,
            Self::Protocol { .. } => ErrorKind::Protocol,
            Self::InvalidConfig { .. } | Self::Io(_) | Self::Parse(_) | Self::Regex(_) | Self::Other { .. } => {
                ErrorKind::External
            }
        }
    }

    /// JSON-RPC 2.0 error code for this error's kind, per the propagation
    /// policy: validation -> Invalid Params, not-found/unknown-method ->
    /// Method Not Found, everything else -> generic Server Error.
    pub fn rpc_code(&self) -> i64 {
        use crate::constants::jsonrpc::{INVALID_PARAMS, METHOD_NOT_FOUND, SERVER_ERROR};
        match self.kind() {
            ErrorKind::InvalidArgument => INVALID_PARAMS,
            ErrorKind::NotFound => METHOD_NOT_FOUND,
            _ => SERVER_ERROR,
        }
    }

    /// Convert an anyhow error to a user-friendly message for CLI/RPC display
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFound { name } => format!("Device '{}' not found", name),
            Self::AppNotFound { bundle_id } => format!("App '{}' not found", bundle_id),
            Self::AvdNotFound { name } => format!("AVD '{}' not found", name),
            Self::AlreadyRunning { name } => format!("Device '{}' is already running", name),
            Self::NotRunning { name } => format!("Device '{}' is not running", name),
            Self::InvalidArgument { message } => message.clone(),
            Self::DeviceOffline { name, detail } => {
                format!("Device '{}' is offline: {}", name, detail)
            }
            Self::Precondition { message } => message.clone(),
            Self::StartFailed { name, reason } => {
                if reason.contains("licenses") {
                    "Android SDK licenses not accepted. Run 'sdkmanager --licenses'".to_string()
                } else if reason.contains("system image") || reason.contains("not installed") {
                    "Required system image not installed".to_string()
                } else {
                    format!("Failed to start device '{}'", name)
                }
            }
            Self::StopFailed { name, .. } => format!("Failed to stop device '{}'", name),
            Self::CreateFailed { name, reason } => {
                if reason.contains("already exists") {
                    format!("Device '{}' already exists", name)
                } else {
                    format!("Failed to create device '{}'", name)
                }
            }
            Self::DeleteFailed { name, .. } => format!("Failed to delete device '{}'", name),
            Self::CommandFailed { command, detail } => format!("{command} failed: {detail}"),
            Self::PlatformNotSupported { platform } => {
                format!("Platform '{}' not supported", platform)
            }
            Self::SdkNotFound { sdk } => {
                format!("{} SDK not found. Check environment variables", sdk)
            }
            Self::InvalidConfig { message } => format!("Configuration error: {message}"),
            Self::Timeout { operation, seconds } => {
                format!("Timed out waiting for {operation} after {seconds}s")
            }
            Self::Unavailable { resource, reason } => format!("{resource} unavailable: {reason}"),
            Self::Protocol { message } => message.clone(),
            Self::Io(_) => "File access error occurred".to_string(),
            Self::Parse(_) => "Data parsing failed".to_string(),
            Self::Regex(_) => "Pattern matching error occurred".to_string(),
            Self::Other { message } => message.clone(),
        }
    }

    /// Get a short error title for notifications
    pub fn error_title(&self) -> String {
        match self {
            Self::NotFound { .. } => "Device Not Found".to_string(),
            Self::AppNotFound { .. } => "App Not Found".to_string(),
            Self::AvdNotFound { .. } => "AVD Not Found".to_string(),
            Self::AlreadyRunning { .. } => "Device Running".to_string(),
            Self::NotRunning { .. } => "Device Stopped".to_string(),
            Self::InvalidArgument { .. } => "Invalid Argument".to_string(),
            Self::DeviceOffline { .. } => "Device Offline".to_string(),
            Self::Precondition { .. } => "Precondition Failed".to_string(),
            Self::StartFailed { .. } => "Start Error".to_string(),
            Self::StopFailed { .. } => "Stop Error".to_string(),
            Self::CreateFailed { .. } => "Creation Error".to_string(),
            Self::DeleteFailed { .. } => "Deletion Error".to_string(),
            Self::CommandFailed { .. } => "Command Error".to_string(),
            Self::PlatformNotSupported { .. } => "Platform Error".to_string(),
            Self::SdkNotFound { .. } => "SDK Error".to_string(),
            Self::InvalidConfig { .. } => "Config Error".to_string(),
            Self::Timeout { .. } => "Timeout".to_string(),
            Self::Unavailable { .. } => "Unavailable".to_string(),
            Self::Protocol { .. } => "Protocol Error".to_string(),
            Self::Io(_) => "IO Error".to_string(),
            Self::Parse(_) => "Parse Error".to_string(),
            Self::Regex(_) => "Regex Error".to_string(),
            Self::Other { .. } => "Error".to_string(),
        }
    }
}

pub type DeviceResult<T> = Result<T, DeviceError>;
