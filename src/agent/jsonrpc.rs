//! JSON-RPC + WebSocket agent client for DeviceKit.
//!
//! A single persistent WebSocket multiplexes every call behind monotonically
//! increasing integer ids. Pending requests live in an id→channel map under
//! a mutex: a reader task routes each incoming response to its waiting
//! caller and, on connection loss, drains the map so every pending caller
//! observes a definite failure instead of hanging forever.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;

use crate::agent::IOSControl;
use crate::constants::agent::{JSONRPC_CLIENT_TIMEOUT, JSONRPC_DUMP_TIMEOUT};
use crate::constants::jsonrpc::JSONRPC_VERSION;
use crate::models::error::DeviceError;
use crate::models::screen::{Orientation, ScreenElement, TapAction, WindowSize};
use crate::models::ForegroundAppInfo;

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<Result<Value, DeviceError>>>>>;

pub struct DeviceKitClient {
    http_base: String,
    http: reqwest::Client,
    next_id: AtomicU64,
    pending: PendingMap,
    outbound: mpsc::UnboundedSender<Message>,
}

impl DeviceKitClient {
    /// Connects to `ws://host:port/ws` and spawns the reader task. `http_base`
    /// is the corresponding `http://host:port` used for streaming endpoints.
    pub async fn connect(ws_url: &str, http_base: impl Into<String>) -> Result<Self, DeviceError> {
        let (ws_stream, _) = tokio_tungstenite::connect_async(ws_url)
            .await
            .map_err(|err| DeviceError::unavailable("devicekit agent", err.to_string()))?;
        let (mut write, mut read) = ws_stream.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));

        tokio::spawn(async move {
            while let Some(message) = outbound_rx.recv().await {
                if write.send(message).await.is_err() {
                    break;
                }
            }
        });

        let reader_pending = pending.clone();
        tokio::spawn(async move {
            while let Some(message) = read.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        if let Ok(value) = serde_json::from_str::<Value>(&text) {
                            if let Some(id) = value.get("id").and_then(Value::as_u64) {
                                if let Some(sender) = reader_pending.lock().unwrap().remove(&id) {
                                    let result = if let Some(error) = value.get("error") {
                                        Err(DeviceError::protocol(error.to_string()))
                                    } else {
                                        Ok(value.get("result").cloned().unwrap_or(Value::Null))
                                    };
                                    let _ = sender.send(result);
                                }
                            }
                        }
                    }
                    Ok(Message::Close(_)) | Err(_) => break,
                    _ => {}
                }
            }
            let mut pending = reader_pending.lock().unwrap();
            for (_, sender) in pending.drain() {
                let _ = sender.send(Err(DeviceError::unavailable(
                    "devicekit agent",
                    "connection closed",
                )));
            }
        });

        Ok(Self {
            http_base: http_base.into(),
            http: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
            pending,
            outbound: outbound_tx,
        })
    }

    async fn call(&self, method: &str, params: Value, timeout: Duration) -> Result<Value, DeviceError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().insert(id, tx);

        let request = json!({
            "jsonrpc": JSONRPC_VERSION,
            "id": id,
            "method": method,
            "params": params,
        });
        let text = serde_json::to_string(&request).map_err(|err| DeviceError::protocol(err.to_string()))?;
        if self.outbound.send(Message::Text(text)).is_err() {
            self.pending.lock().unwrap().remove(&id);
            return Err(DeviceError::unavailable("devicekit agent", "connection closed"));
        }

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(DeviceError::unavailable("devicekit agent", "connection closed")),
            Err(_) => {
                self.pending.lock().unwrap().remove(&id);
                Err(DeviceError::timeout(format!("devicekit call '{method}'"), timeout.as_secs()))
            }
        }
    }

    async fn stream(
        &self,
        path: &str,
        mut on_data: Box<dyn FnMut(Bytes) -> bool + Send>,
    ) -> Result<(), DeviceError> {
        let url = format!("{}{}", self.http_base, path);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| DeviceError::unavailable("devicekit agent", err.to_string()))?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| DeviceError::unavailable("devicekit agent", err.to_string()))?;
            if !on_data(chunk) {
                break;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl IOSControl for DeviceKitClient {
    async fn take_screenshot(&self) -> Result<Vec<u8>, DeviceError> {
        use base64::Engine;
        let result = self
            .call("takeScreenshot", json!({}), JSONRPC_CLIENT_TIMEOUT)
            .await?;
        let encoded = result["data"]
            .as_str()
            .ok_or_else(|| DeviceError::protocol("missing screenshot data"))?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|err| DeviceError::protocol(err.to_string()))
    }

    async fn tap(&self, x: f64, y: f64) -> Result<(), DeviceError> {
        self.call("tap", json!({ "x": x, "y": y }), JSONRPC_CLIENT_TIMEOUT)
            .await?;
        Ok(())
    }

    async fn long_press(&self, x: f64, y: f64, duration_ms: u64) -> Result<(), DeviceError> {
        self.call(
            "longPress",
            json!({ "x": x, "y": y, "durationMs": duration_ms }),
            JSONRPC_CLIENT_TIMEOUT,
        )
        .await?;
        Ok(())
    }

    async fn swipe(&self, from: (f64, f64), to: (f64, f64), duration_ms: u64) -> Result<(), DeviceError> {
        self.call(
            "swipe",
            json!({
                "fromX": from.0,
                "fromY": from.1,
                "toX": to.0,
                "toY": to.1,
                "durationMs": duration_ms as f64 / 1000.0,
            }),
            JSONRPC_CLIENT_TIMEOUT,
        )
        .await?;
        Ok(())
    }

    async fn gesture(&self, actions: &[TapAction]) -> Result<(), DeviceError> {
        let native = crate::agent::gesture::translate_to_press_move_release(actions);
        let wire_actions: Vec<Value> = native
            .iter()
            .map(|action| {
                json!({
                    "type": action.kind,
                    "x": action.x,
                    "y": action.y,
                    "duration_ms": action.duration_ms.map(|ms| ms as f64 / 1000.0),
                    "button": action.button,
                })
            })
            .collect();
        self.call("gesture", json!({ "actions": wire_actions }), JSONRPC_CLIENT_TIMEOUT)
            .await?;
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<(), DeviceError> {
        if text.is_empty() {
            return Ok(());
        }
        self.call("sendKeys", json!({ "text": text }), JSONRPC_CLIENT_TIMEOUT)
            .await?;
        Ok(())
    }

    async fn press_button(&self, button: &str) -> Result<(), DeviceError> {
        self.call("pressButton", json!({ "button": button }), JSONRPC_CLIENT_TIMEOUT)
            .await?;
        Ok(())
    }

    async fn open_url(&self, url: &str) -> Result<(), DeviceError> {
        self.call("openURL", json!({ "url": url }), JSONRPC_CLIENT_TIMEOUT)
            .await?;
        Ok(())
    }

    async fn get_source_elements(&self) -> Result<Vec<ScreenElement>, DeviceError> {
        let result = self
            .call("getSourceElements", json!({}), JSONRPC_DUMP_TIMEOUT)
            .await?;
        let elements: Vec<ScreenElement> =
            serde_json::from_value(result).map_err(|err| DeviceError::protocol(err.to_string()))?;
        Ok(elements)
    }

    async fn get_source_raw(&self) -> Result<String, DeviceError> {
        let result = self
            .call("getSourceRaw", json!({}), JSONRPC_DUMP_TIMEOUT)
            .await?;
        Ok(result.as_str().unwrap_or_default().to_string())
    }

    async fn get_orientation(&self) -> Result<Orientation, DeviceError> {
        let result = self
            .call("getOrientation", json!({}), JSONRPC_CLIENT_TIMEOUT)
            .await?;
        serde_json::from_value(result).map_err(|err| DeviceError::protocol(err.to_string()))
    }

    async fn set_orientation(&self, orientation: Orientation) -> Result<(), DeviceError> {
        self.call(
            "setOrientation",
            json!({ "orientation": orientation }),
            JSONRPC_CLIENT_TIMEOUT,
        )
        .await?;
        Ok(())
    }

    async fn get_window_size(&self) -> Result<WindowSize, DeviceError> {
        let result = self
            .call("getWindowSize", json!({}), JSONRPC_CLIENT_TIMEOUT)
            .await?;
        serde_json::from_value(result).map_err(|err| DeviceError::protocol(err.to_string()))
    }

    async fn get_foreground_app(&self) -> Result<ForegroundAppInfo, DeviceError> {
        let result = self
            .call("getForegroundApp", json!({}), JSONRPC_CLIENT_TIMEOUT)
            .await?;
        serde_json::from_value(result).map_err(|err| DeviceError::protocol(err.to_string()))
    }

    async fn health_check(&self) -> Result<(), DeviceError> {
        self.call("healthCheck", json!({}), JSONRPC_CLIENT_TIMEOUT)
            .await?;
        Ok(())
    }

    async fn wait_for_ready(&self, timeout: Duration) -> Result<(), DeviceError> {
        crate::lifecycle::bootstrap::poll_until_ready(timeout, || self.health_check()).await
    }

    async fn close(&self) {
        let _ = self.outbound.send(Message::Close(None));
    }

    async fn start_mjpeg_stream(
        &self,
        fps: u32,
        on_data: Box<dyn FnMut(Bytes) -> bool + Send>,
    ) -> Result<(), DeviceError> {
        self.stream(&format!("/stream/mjpeg?fps={fps}"), on_data).await
    }

    async fn start_h264_stream(
        &self,
        fps: u32,
        quality: u32,
        scale: f64,
        on_data: Box<dyn FnMut(Bytes) -> bool + Send>,
    ) -> Result<(), DeviceError> {
        self.stream(
            &format!("/stream/h264?fps={fps}&quality={quality}&scale={scale}"),
            on_data,
        )
        .await
    }
}
