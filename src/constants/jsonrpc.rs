//! JSON-RPC 2.0 envelope constants: protocol version, standard error codes,
//! and the method name registry exposed by the server dispatcher.

/// The only protocol version this dispatcher accepts.
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC 2.0 error codes (-32768..-32000 is the reserved range).
pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;
pub const SERVER_ERROR: i64 = -32000;

/// Server-interval for WebSocket keep-alive pings.
pub const WS_PING_INTERVAL_SECS: u64 = 54;

/// Write deadline extension for multipart screen-capture streaming.
pub const STREAM_WRITE_DEADLINE_SECS: u64 = 600;

pub mod methods {
    pub const DEVICES: &str = "devices";
    pub const SCREENSHOT: &str = "screenshot";
    pub const SCREENCAPTURE: &str = "screencapture";
    pub const IO_TAP: &str = "io_tap";
    pub const IO_LONGPRESS: &str = "io_longpress";
    pub const IO_SWIPE: &str = "io_swipe";
    pub const IO_TEXT: &str = "io_text";
    pub const IO_BUTTON: &str = "io_button";
    pub const IO_GESTURE: &str = "io_gesture";
    pub const URL: &str = "url";
    pub const DEVICE_INFO: &str = "device_info";
    pub const IO_ORIENTATION_GET: &str = "io_orientation_get";
    pub const IO_ORIENTATION_SET: &str = "io_orientation_set";
    pub const DEVICE_BOOT: &str = "device_boot";
    pub const DEVICE_SHUTDOWN: &str = "device_shutdown";
    pub const DEVICE_REBOOT: &str = "device_reboot";
    pub const DUMP_UI: &str = "dump_ui";
    pub const APPS_LAUNCH: &str = "apps_launch";
    pub const APPS_TERMINATE: &str = "apps_terminate";
    pub const APPS_LIST: &str = "apps_list";

    /// Methods that are only meaningful over the HTTP endpoint; requesting
    /// them over the WebSocket connection yields `METHOD_NOT_FOUND`.
    pub const HTTP_ONLY: &[&str] = &[SCREENCAPTURE];
}
