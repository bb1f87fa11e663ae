//! HTTP and WebSocket transports for the JSON-RPC dispatcher.
//!
//! Both routes feed the same [`Dispatcher`]; `/rpc` additionally special-cases
//! `screencapture` into a multipart/x-mixed-replace streaming response since
//! that method has no sensible single-envelope reply.

use std::str::FromStr;
use std::time::Duration;

use axum::body::Body;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use bytes::Bytes;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tower_http::cors::CorsLayer;

use crate::command::{CommandContext, ScreenCaptureFormat};
use crate::constants::jsonrpc::{methods, PARSE_ERROR, WS_PING_INTERVAL_SECS};

use super::dispatch::Dispatcher;

const MULTIPART_BOUNDARY: &str = "mobilecli-frame";
/// Screen-capture writes pause the socket if the client stops reading;
/// give up and tear down the stream past this long so a dead peer can't
/// pin the underlying device capture open forever.
const STREAM_WRITE_DEADLINE: Duration = Duration::from_secs(crate::constants::jsonrpc::STREAM_WRITE_DEADLINE_SECS);

#[derive(Clone)]
struct AppState {
    dispatcher: Dispatcher,
    cors_enabled: bool,
}

/// Builds the full router: `POST /rpc`, `GET /ws`, CORS layered on only
/// when the caller opts in (matching `ServerConfig::cors`).
pub fn router(ctx: CommandContext, cors_enabled: bool) -> Router {
    let state = AppState {
        dispatcher: Dispatcher::new(ctx),
        cors_enabled,
    };

    let mut router = Router::new()
        .route("/rpc", post(rpc_handler))
        .route("/ws", get(ws_handler))
        .with_state(state);

    if cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    router
}

async fn rpc_handler(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    if state.cors_enabled {
        // CorsLayer handles the response headers; same-origin enforcement
        // below only applies when CORS is off.
    } else if let Some(origin) = headers.get(axum::http::header::ORIGIN) {
        if !same_origin(origin, headers.get(axum::http::header::HOST)) {
            return (StatusCode::FORBIDDEN, "cross-origin requests are disabled").into_response();
        }
    }

    let body = match std::str::from_utf8(&body) {
        Ok(body) => body,
        Err(_) => {
            return axum::Json(json!({
                "jsonrpc": "2.0",
                "id": Value::Null,
                "error": { "code": PARSE_ERROR, "message": "request body must be utf-8" },
            }))
            .into_response()
        }
    };

    let raw: Result<Value, _> = serde_json::from_str(body);
    if let Ok(value) = &raw {
        if value.get("method").and_then(Value::as_str) == Some(methods::SCREENCAPTURE) {
            return screencapture_response(&state, value.clone()).await;
        }
    }

    let response = match raw {
        Ok(value) => state.dispatcher.dispatch_value(value, true).await,
        Err(_) => state.dispatcher.dispatch_str(body, true).await,
    };
    axum::Json(response).into_response()
}

async fn screencapture_response(state: &AppState, request: Value) -> Response {
    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let params = request.get("params").cloned().unwrap_or(Value::Null);

    let device_id = params.get("deviceId").and_then(Value::as_str).map(str::to_string);
    let format = match params.get("format").and_then(Value::as_str) {
        Some(raw) => match ScreenCaptureFormat::from_str(raw) {
            Ok(format) => format,
            Err(message) => return json_rpc_error(id, crate::constants::jsonrpc::INVALID_PARAMS, message),
        },
        None => ScreenCaptureFormat::Mjpeg,
    };

    let (tx, rx) = mpsc::channel::<Bytes>(8);
    let ctx = state.dispatcher.context().clone();
    let last_write = std::sync::Arc::new(std::sync::Mutex::new(std::time::Instant::now()));

    let producer = {
        let last_write = last_write.clone();
        tokio::spawn(async move {
            // `on_data` runs synchronously inside the manager's async capture
            // loop, so it can't block on the channel; a full channel just
            // drops the frame rather than stalling the capture.
            let on_data: Box<dyn FnMut(Bytes) -> bool + Send> = Box::new(move |chunk| {
                let part = wrap_multipart_chunk(chunk);
                match tx.try_send(part) {
                    Ok(()) => {
                        *last_write.lock().unwrap() = std::time::Instant::now();
                        true
                    }
                    Err(mpsc::error::TrySendError::Full(_)) => true,
                    Err(mpsc::error::TrySendError::Closed(_)) => false,
                }
            });
            if let Err(err) = ctx.screencapture(device_id.as_deref(), format, on_data).await {
                log::warn!("screen capture stream ended: {err}");
            }
        })
    };

    // A producer that stalls past the write deadline (device wedged, agent
    // hung) gets cancelled so the HTTP response completes instead of hanging.
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            if producer.is_finished() {
                break;
            }
            if last_write.lock().unwrap().elapsed() > STREAM_WRITE_DEADLINE {
                producer.abort();
                break;
            }
        }
    });

    let stream = futures::StreamExt::map(ReceiverStream::new(rx), Ok::<_, std::io::Error>);
    let body = Body::from_stream(stream);

    Response::builder()
        .status(StatusCode::OK)
        .header(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_str(&format!("multipart/x-mixed-replace; boundary={MULTIPART_BOUNDARY}")).unwrap(),
        )
        .header(axum::http::header::CACHE_CONTROL, HeaderValue::from_static("no-cache"))
        .header(axum::http::header::CONNECTION, HeaderValue::from_static("keep-alive"))
        .header(axum::http::header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"))
        .body(body)
        .unwrap()
}

fn wrap_multipart_chunk(data: Bytes) -> Bytes {
    let mut framed = Vec::with_capacity(data.len() + 96);
    framed.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    framed.extend_from_slice(b"Content-Type: application/octet-stream\r\n");
    framed.extend_from_slice(format!("Content-Length: {}\r\n\r\n", data.len()).as_bytes());
    framed.extend_from_slice(&data);
    framed.extend_from_slice(b"\r\n");
    Bytes::from(framed)
}

fn json_rpc_error(id: Value, code: i64, message: impl Into<String>) -> Response {
    axum::Json(json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message.into() },
    }))
    .into_response()
}

fn same_origin(origin: &HeaderValue, host: Option<&HeaderValue>) -> bool {
    let (Ok(origin), Some(Ok(host))) = (origin.to_str(), host.map(HeaderValue::to_str)) else {
        return false;
    };
    origin
        .rsplit("://")
        .next()
        .map(|rest| rest == host)
        .unwrap_or(false)
}

async fn ws_handler(State(state): State<AppState>, headers: HeaderMap, ws: WebSocketUpgrade) -> Response {
    if !state.cors_enabled {
        if let Some(origin) = headers.get(axum::http::header::ORIGIN) {
            if !same_origin(origin, headers.get(axum::http::header::HOST)) {
                return (StatusCode::FORBIDDEN, "cross-origin upgrades are disabled").into_response();
            }
        }
    }
    ws.on_upgrade(move |socket| ws_session(socket, state.dispatcher))
}

async fn ws_session(mut socket: WebSocket, dispatcher: Dispatcher) {
    let mut ping_interval = tokio::time::interval(Duration::from_secs(WS_PING_INTERVAL_SECS));
    ping_interval.tick().await;

    loop {
        tokio::select! {
            _ = ping_interval.tick() => {
                if socket.send(Message::Ping(Vec::new())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        let response = dispatcher.dispatch_str(&text, false).await;
                        if socket.send(Message::Text(response.to_string())).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Binary(_))) => {
                        let response = json!({
                            "jsonrpc": "2.0",
                            "id": Value::Null,
                            "error": { "code": PARSE_ERROR, "message": "binary frames are not accepted" },
                        });
                        if socket.send(Message::Text(response.to_string())).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Pong(_))) | Some(Ok(Message::Ping(_))) => {}
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        log::debug!("websocket session ended: {err}");
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_origin_matches_host_header() {
        let origin = HeaderValue::from_static("http://127.0.0.1:8090");
        let host = HeaderValue::from_static("127.0.0.1:8090");
        assert!(same_origin(&origin, Some(&host)));
    }

    #[test]
    fn same_origin_rejects_mismatched_host() {
        let origin = HeaderValue::from_static("http://evil.example:1234");
        let host = HeaderValue::from_static("127.0.0.1:8090");
        assert!(!same_origin(&origin, Some(&host)));
    }
}
