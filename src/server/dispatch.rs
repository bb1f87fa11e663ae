//! JSON-RPC 2.0 envelope and method registry, shared verbatim by the HTTP
//! and WebSocket transports.

use base64::Engine as _;
use serde_json::{json, Value};

use crate::command::{
    ButtonParams, BundleParams, CommandContext, DeviceIdParams, GestureParams, LongPressParams,
    OrientationSetParams, SwipeParams, TapParams, TextParams, UrlParams,
};
use crate::constants::jsonrpc::{
    methods, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::models::error::DeviceError;

#[derive(Clone)]
pub struct Dispatcher {
    ctx: CommandContext,
}

#[derive(Debug)]
enum DispatchError {
    UnknownMethod(String),
    InvalidParams(String),
    Device(DeviceError),
}

impl From<DeviceError> for DispatchError {
    fn from(err: DeviceError) -> Self {
        Self::Device(err)
    }
}

/// Missing `params` is treated as an empty object: fields with
/// `#[serde(default)]` fall back, required fields surface as an ordinary
/// invalid-params error instead of a bound-checking special case.
fn params_of<T: serde::de::DeserializeOwned>(params: &Value) -> Result<T, DispatchError> {
    let value = if params.is_null() { json!({}) } else { params.clone() };
    serde_json::from_value(value).map_err(|e| DispatchError::InvalidParams(e.to_string()))
}

impl Dispatcher {
    pub fn new(ctx: CommandContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &CommandContext {
        &self.ctx
    }

    /// Parses and dispatches one JSON-RPC request body, returning the
    /// response envelope. `allow_http_only` gates methods (currently just
    /// `screencapture`) that only make sense on the HTTP transport.
    pub async fn dispatch_str(&self, body: &str, allow_http_only: bool) -> Value {
        let raw: Value = match serde_json::from_str(body) {
            Ok(v) => v,
            Err(_) => {
                return error_envelope(
                    Value::Null,
                    PARSE_ERROR,
                    "Parse error",
                    Some(json!("expecting jsonrpc payload")),
                )
            }
        };
        self.dispatch_value(raw, allow_http_only).await
    }

    pub async fn dispatch_value(&self, raw: Value, allow_http_only: bool) -> Value {
        let id = raw.get("id").cloned().unwrap_or(Value::Null);

        let jsonrpc = raw.get("jsonrpc").and_then(Value::as_str);
        if jsonrpc != Some(JSONRPC_VERSION) {
            return error_envelope(
                id,
                INVALID_REQUEST,
                "Invalid Request",
                Some(json!("'jsonrpc' must be '2.0'")),
            );
        }

        let Some(method) = raw.get("method").and_then(Value::as_str).filter(|m| !m.is_empty()) else {
            return error_envelope(
                id,
                INVALID_REQUEST,
                "Invalid Request",
                Some(json!("method must be non-empty")),
            );
        };

        if !allow_http_only && methods::HTTP_ONLY.contains(&method) {
            return error_envelope(
                id,
                METHOD_NOT_FOUND,
                "Method not found",
                Some(json!(format!("{method}: use HTTP /rpc endpoint"))),
            );
        }

        let params = raw.get("params").cloned().unwrap_or(Value::Null);
        match self.call(method, params).await {
            Ok(result) => ok_envelope(id, result),
            Err(DispatchError::UnknownMethod(method)) => error_envelope(
                id,
                METHOD_NOT_FOUND,
                "Method not found",
                Some(json!(format!("unknown method: {method}"))),
            ),
            Err(DispatchError::InvalidParams(message)) => {
                error_envelope(id, INVALID_PARAMS, "Invalid params", Some(json!(message)))
            }
            Err(DispatchError::Device(err)) => error_envelope(
                id,
                err.rpc_code(),
                "Device error",
                Some(json!(err.user_friendly_message())),
            ),
        }
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, DispatchError> {
        match method {
            methods::DEVICES => {
                let include_offline = params
                    .get("includeOffline")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let devices = self.ctx.devices(include_offline).await?;
                Ok(json!({ "devices": devices }))
            }
            methods::DEVICE_INFO => {
                let p: DeviceIdParams = params_of(&params)?;
                Ok(serde_json::to_value(self.ctx.device_info(p.device_id.as_deref()).await?).unwrap())
            }
            methods::DEVICE_BOOT => {
                let p: DeviceIdParams = params_of(&params)?;
                let id = p.device_id.ok_or_else(|| DispatchError::InvalidParams("deviceId is required".into()))?;
                self.ctx.device_boot(&id).await?;
                Ok(Value::Null)
            }
            methods::DEVICE_SHUTDOWN => {
                let p: DeviceIdParams = params_of(&params)?;
                let id = p.device_id.ok_or_else(|| DispatchError::InvalidParams("deviceId is required".into()))?;
                self.ctx.device_shutdown(&id).await?;
                Ok(Value::Null)
            }
            methods::DEVICE_REBOOT => {
                let p: DeviceIdParams = params_of(&params)?;
                let id = p.device_id.ok_or_else(|| DispatchError::InvalidParams("deviceId is required".into()))?;
                self.ctx.device_reboot(&id).await?;
                Ok(Value::Null)
            }
            methods::IO_TAP => {
                let p: TapParams = params_of(&params)?;
                self.ctx.io_tap(p).await?;
                Ok(Value::Null)
            }
            methods::IO_LONGPRESS => {
                let p: LongPressParams = params_of(&params)?;
                self.ctx.io_longpress(p).await?;
                Ok(Value::Null)
            }
            methods::IO_SWIPE => {
                let p: SwipeParams = params_of(&params)?;
                self.ctx.io_swipe(p).await?;
                Ok(Value::Null)
            }
            methods::IO_TEXT => {
                let p: TextParams = params_of(&params)?;
                self.ctx.io_text(p).await?;
                Ok(Value::Null)
            }
            methods::IO_BUTTON => {
                let p: ButtonParams = params_of(&params)?;
                self.ctx.io_button(p).await?;
                Ok(Value::Null)
            }
            methods::IO_GESTURE => {
                let p: GestureParams = params_of(&params)?;
                self.ctx.io_gesture(p).await?;
                Ok(Value::Null)
            }
            methods::URL => {
                let p: UrlParams = params_of(&params)?;
                self.ctx.url(p).await?;
                Ok(Value::Null)
            }
            methods::IO_ORIENTATION_GET => {
                let p: DeviceIdParams = params_of(&params)?;
                Ok(serde_json::to_value(self.ctx.io_orientation_get(p.device_id.as_deref()).await?).unwrap())
            }
            methods::IO_ORIENTATION_SET => {
                let p: OrientationSetParams = params_of(&params)?;
                self.ctx.io_orientation_set(p).await?;
                Ok(Value::Null)
            }
            methods::DUMP_UI => {
                let p: DeviceIdParams = params_of(&params)?;
                Ok(serde_json::to_value(self.ctx.dump_ui(p.device_id.as_deref()).await?).unwrap())
            }
            methods::APPS_LIST => {
                let p: DeviceIdParams = params_of(&params)?;
                Ok(serde_json::to_value(self.ctx.apps_list(p.device_id.as_deref()).await?).unwrap())
            }
            methods::APPS_LAUNCH => {
                let p: BundleParams = params_of(&params)?;
                self.ctx.apps_launch(p).await?;
                Ok(Value::Null)
            }
            methods::APPS_TERMINATE => {
                let p: BundleParams = params_of(&params)?;
                self.ctx.apps_terminate(p).await?;
                Ok(Value::Null)
            }
            methods::SCREENSHOT => {
                let p: DeviceIdParams = params_of(&params)?;
                let bytes = self.ctx.screenshot(p.device_id.as_deref()).await?;
                Ok(json!({ "data": base64::engine::general_purpose::STANDARD.encode(bytes) }))
            }
            other => Err(DispatchError::UnknownMethod(other.to_string())),
        }
    }
}

fn ok_envelope(id: Value, result: Value) -> Value {
    json!({ "jsonrpc": JSONRPC_VERSION, "id": id, "result": result })
}

fn error_envelope(id: Value, code: i64, message: impl Into<String>, data: Option<Value>) -> Value {
    let mut error = json!({ "code": code, "message": message.into() });
    if let Some(data) = data {
        error["data"] = data;
    }
    json!({ "jsonrpc": JSONRPC_VERSION, "id": id, "error": error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::managers::{AndroidManager, IosManager, IosRealManager};
    use crate::utils::command_executor::mock::MockCommandExecutor;
    use std::sync::Arc;

    fn dispatcher() -> Dispatcher {
        let android = Arc::new(AndroidManager::with_executor(Arc::new(MockCommandExecutor::new())).unwrap());
        let ios_simulator = Arc::new(
            IosManager::with_executor(Arc::new(MockCommandExecutor::new()))
                .expect("iOS manager construction requires xcrun on macOS test runners"),
        );
        let ios_real = Arc::new(IosRealManager::with_executor(Arc::new(MockCommandExecutor::new())));
        Dispatcher::new(CommandContext::new(android, ios_simulator, ios_real))
    }

    #[tokio::test]
    async fn empty_body_is_a_parse_error() {
        let d = dispatcher();
        let response = d.dispatch_str("", true).await;
        assert_eq!(response["error"]["code"], PARSE_ERROR);
        assert_eq!(response["id"], Value::Null);
    }

    #[tokio::test]
    async fn wrong_jsonrpc_version_is_invalid_request() {
        let d = dispatcher();
        let response = d
            .dispatch_str(r#"{"jsonrpc":"1.0","method":"devices","id":1}"#, true)
            .await;
        assert_eq!(response["error"]["code"], INVALID_REQUEST);
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let d = dispatcher();
        let response = d.dispatch_str(r#"{"jsonrpc":"2.0","method":"foo","id":7}"#, true).await;
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
        assert_eq!(response["id"], 7);
    }

    #[tokio::test]
    async fn screencapture_is_rejected_when_http_only_is_disallowed() {
        let d = dispatcher();
        let response = d
            .dispatch_str(r#"{"jsonrpc":"2.0","method":"screencapture","id":3,"params":{"deviceId":"d"}}"#, false)
            .await;
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
        assert!(response["error"]["data"]
            .as_str()
            .unwrap()
            .contains("use HTTP /rpc endpoint"));
    }

    #[tokio::test]
    #[cfg(target_os = "macos")]
    async fn negative_tap_coordinates_are_invalid_params() {
        let d = dispatcher();
        let response = d
            .dispatch_str(
                r#"{"jsonrpc":"2.0","method":"io_tap","id":2,"params":{"deviceId":"X","x":-1,"y":10}}"#,
                true,
            )
            .await;
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
        assert!(response["error"]["data"]
            .as_str()
            .unwrap()
            .contains("coordinates must be non-negative"));
    }
}
