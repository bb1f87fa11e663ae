//! REST-style agent client for WebDriverAgent.
//!
//! Holds a lazily-created session id behind a mutex; any call that gets a
//! `404` or a missing session re-creates the session once and retries,
//! rather than surfacing the staleness to the caller.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use serde_json::json;

use crate::agent::IOSControl;
use crate::constants::agent::REST_CLIENT_TIMEOUT;
use crate::models::error::DeviceError;
use crate::models::screen::{Orientation, Rect, ScreenElement, TapAction, TapActionKind, WindowSize};
use crate::models::ForegroundAppInfo;

pub struct WdaClient {
    base_url: String,
    http: reqwest::Client,
    session_id: Mutex<Option<String>>,
}

impl WdaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, REST_CLIENT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("reqwest client"),
            session_id: Mutex::new(None),
        }
    }

    fn current_session(&self) -> Option<String> {
        self.session_id.lock().unwrap().clone()
    }

    async fn create_session(&self) -> Result<String, DeviceError> {
        let body = json!({ "capabilities": { "alwaysMatch": {} } });
        let response = self
            .http
            .post(format!("{}/session", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|err| DeviceError::unavailable("wda agent", err.to_string()))?;
        if !response.status().is_success() {
            return Err(DeviceError::unavailable(
                "wda agent",
                format!("session create returned {}", response.status()),
            ));
        }
        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|err| DeviceError::protocol(err.to_string()))?;
        let id = value["sessionId"]
            .as_str()
            .or_else(|| value["value"]["sessionId"].as_str())
            .ok_or_else(|| DeviceError::protocol("missing sessionId in WDA response"))?
            .to_string();
        *self.session_id.lock().unwrap() = Some(id.clone());
        Ok(id)
    }

    async fn ensure_session(&self) -> Result<String, DeviceError> {
        match self.current_session() {
            Some(id) => Ok(id),
            None => self.create_session().await,
        }
    }

    async fn session_request(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, DeviceError> {
        let session_id = self.ensure_session().await?;
        let url = format!("{}/session/{}{}", self.base_url, session_id, path);
        let response = self.issue(method.clone(), &url, body.clone()).await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            *self.session_id.lock().unwrap() = None;
            let session_id = self.create_session().await?;
            let url = format!("{}/session/{}{}", self.base_url, session_id, path);
            let response = self.issue(method, &url, body).await?;
            return self.parse_value(response).await;
        }
        self.parse_value(response).await
    }

    async fn issue(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, DeviceError> {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        request
            .send()
            .await
            .map_err(|err| DeviceError::unavailable("wda agent", err.to_string()))
    }

    async fn parse_value(&self, response: reqwest::Response) -> Result<serde_json::Value, DeviceError> {
        if !response.status().is_success() {
            return Err(DeviceError::unavailable(
                "wda agent",
                format!("request failed with status {}", response.status()),
            ));
        }
        response
            .json()
            .await
            .map_err(|err| DeviceError::protocol(err.to_string()))
    }
}

#[async_trait]
impl IOSControl for WdaClient {
    async fn take_screenshot(&self) -> Result<Vec<u8>, DeviceError> {
        let value = self
            .session_request(reqwest::Method::GET, "/screenshot", None)
            .await?;
        let encoded = value["value"]
            .as_str()
            .ok_or_else(|| DeviceError::protocol("missing screenshot value"))?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|err| DeviceError::protocol(err.to_string()))
    }

    async fn tap(&self, x: f64, y: f64) -> Result<(), DeviceError> {
        self.gesture(&[TapAction::new(TapActionKind::Press).at(x, y)])
            .await
    }

    async fn long_press(&self, x: f64, y: f64, duration_ms: u64) -> Result<(), DeviceError> {
        self.gesture(&[
            TapAction::new(TapActionKind::Press).at(x, y),
            TapAction::new(TapActionKind::Release)
                .at(x, y)
                .with_duration_ms(duration_ms),
        ])
        .await
    }

    async fn swipe(&self, from: (f64, f64), to: (f64, f64), duration_ms: u64) -> Result<(), DeviceError> {
        self.gesture(&[
            TapAction::new(TapActionKind::Press).at(from.0, from.1),
            TapAction::new(TapActionKind::Move)
                .at(to.0, to.1)
                .with_duration_ms(duration_ms),
            TapAction::new(TapActionKind::Release).at(to.0, to.1),
        ])
        .await
    }

    async fn gesture(&self, actions: &[TapAction]) -> Result<(), DeviceError> {
        let body = json!({ "actions": actions });
        self.session_request(reqwest::Method::POST, "/wda/touch/perform", Some(body))
            .await?;
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<(), DeviceError> {
        if text.is_empty() {
            return Ok(());
        }
        let body = json!({ "value": text.chars().map(|c| c.to_string()).collect::<Vec<_>>() });
        self.session_request(reqwest::Method::POST, "/wda/keys", Some(body))
            .await?;
        Ok(())
    }

    async fn press_button(&self, button: &str) -> Result<(), DeviceError> {
        let body = json!({ "name": button });
        self.session_request(reqwest::Method::POST, "/wda/pressButton", Some(body))
            .await?;
        Ok(())
    }

    async fn open_url(&self, url: &str) -> Result<(), DeviceError> {
        let body = json!({ "url": url });
        self.session_request(reqwest::Method::POST, "/url", Some(body))
            .await?;
        Ok(())
    }

    async fn get_source_elements(&self) -> Result<Vec<ScreenElement>, DeviceError> {
        let value = self
            .session_request(reqwest::Method::GET, "/source?format=json", None)
            .await?;
        let raw_elements = value["value"]["elements"]
            .as_array()
            .cloned()
            .unwrap_or_default();
        let mut elements = Vec::with_capacity(raw_elements.len());
        for raw in raw_elements {
            let element_type = crate::agent::elements::map_element_type(
                raw["type"].as_str().unwrap_or_default(),
            );
            let enabled = raw["enabled"].as_bool().unwrap_or(true);
            let element = ScreenElement {
                element_type,
                label: raw["label"].as_str().map(str::to_string),
                name: raw["name"].as_str().map(str::to_string),
                value: raw["value"].as_str().map(str::to_string),
                identifier: raw["identifier"].as_str().map(str::to_string),
                text: raw["text"].as_str().map(str::to_string),
                focused: raw["focused"].as_bool(),
                rect: Rect {
                    x: raw["rect"]["x"].as_f64().unwrap_or(0.0),
                    y: raw["rect"]["y"].as_f64().unwrap_or(0.0),
                    width: raw["rect"]["width"].as_f64().unwrap_or(0.0),
                    height: raw["rect"]["height"].as_f64().unwrap_or(0.0),
                },
            };
            if element.should_emit(enabled) {
                elements.push(element);
            }
        }
        Ok(elements)
    }

    async fn get_source_raw(&self) -> Result<String, DeviceError> {
        let value = self
            .session_request(reqwest::Method::GET, "/source", None)
            .await?;
        Ok(value["value"].as_str().unwrap_or_default().to_string())
    }

    async fn get_orientation(&self) -> Result<Orientation, DeviceError> {
        let value = self
            .session_request(reqwest::Method::GET, "/orientation", None)
            .await?;
        match value["value"].as_str() {
            Some("LANDSCAPE") => Ok(Orientation::Landscape),
            _ => Ok(Orientation::Portrait),
        }
    }

    async fn set_orientation(&self, orientation: Orientation) -> Result<(), DeviceError> {
        let wire = match orientation {
            Orientation::Portrait => "PORTRAIT",
            Orientation::Landscape => "LANDSCAPE",
        };
        let body = json!({ "orientation": wire });
        self.session_request(reqwest::Method::POST, "/orientation", Some(body))
            .await?;
        Ok(())
    }

    async fn get_window_size(&self) -> Result<WindowSize, DeviceError> {
        let value = self
            .session_request(reqwest::Method::GET, "/window/size", None)
            .await?;
        Ok(WindowSize {
            width: value["value"]["width"].as_f64().unwrap_or(0.0),
            height: value["value"]["height"].as_f64().unwrap_or(0.0),
            scale: value["value"]["scale"].as_f64().unwrap_or(1.0),
        })
    }

    async fn get_foreground_app(&self) -> Result<ForegroundAppInfo, DeviceError> {
        let value = self
            .session_request(reqwest::Method::GET, "/wda/activeAppInfo", None)
            .await?;
        Ok(ForegroundAppInfo {
            bundle_id: value["value"]["bundleId"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            name: value["value"]["name"].as_str().map(str::to_string),
            pid: value["value"]["pid"].as_u64().map(|p| p as u32),
        })
    }

    async fn health_check(&self) -> Result<(), DeviceError> {
        let response = self
            .issue(reqwest::Method::GET, &format!("{}/status", self.base_url), None)
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(DeviceError::unavailable(
                "wda agent",
                format!("status endpoint returned {}", response.status()),
            ))
        }
    }

    async fn wait_for_ready(&self, timeout: Duration) -> Result<(), DeviceError> {
        crate::lifecycle::bootstrap::poll_until_ready(timeout, || self.health_check()).await
    }

    async fn close(&self) {
        if let Some(session_id) = self.current_session() {
            let url = format!("{}/session/{}", self.base_url, session_id);
            let _ = self.http.delete(url).send().await;
        }
        *self.session_id.lock().unwrap() = None;
    }

    async fn start_mjpeg_stream(
        &self,
        _fps: u32,
        _on_data: Box<dyn FnMut(Bytes) -> bool + Send>,
    ) -> Result<(), DeviceError> {
        Err(DeviceError::precondition(
            "MJPEG streaming is served by the DeviceKit agent, not WebDriverAgent",
        ))
    }

    async fn start_h264_stream(
        &self,
        _fps: u32,
        _quality: u32,
        _scale: f64,
        _on_data: Box<dyn FnMut(Bytes) -> bool + Send>,
    ) -> Result<(), DeviceError> {
        Err(DeviceError::precondition(
            "H.264 streaming is served by the DeviceKit agent, not WebDriverAgent",
        ))
    }
}
