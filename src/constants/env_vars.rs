//! Environment variable names used by the application.

/// Android SDK environment variables
pub const ANDROID_HOME: &str = "ANDROID_HOME";
pub const ANDROID_SDK_ROOT: &str = "ANDROID_SDK_ROOT";

/// System environment variables
pub const HOME: &str = "HOME";
pub const PATH: &str = "PATH";

/// Logging and debugging variables
pub const RUST_LOG: &str = "RUST_LOG";
pub const ANDROID_EMULATOR_LOG_ENABLE: &str = "ANDROID_EMULATOR_LOG_ENABLE";
pub const ANDROID_AVD_VERBOSE: &str = "ANDROID_AVD_VERBOSE";
pub const ANDROID_VERBOSE: &str = "ANDROID_VERBOSE";
