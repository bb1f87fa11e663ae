//! Agent control clients: the capability set every on-device agent
//! (WebDriverAgent via REST, DeviceKit via JSON-RPC+WS) satisfies, plus the
//! pure translation helpers shared between implementations.

pub mod elements;
pub mod gesture;
pub mod jsonrpc;
pub mod rest;

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::models::error::DeviceError;
use crate::models::screen::{Orientation, ScreenElement, TapAction, WindowSize};
use crate::models::ForegroundAppInfo;

/// Capability set implemented identically by the REST-style (WDA) and
/// JSON-RPC (DeviceKit) agent clients, so substrates can hold one
/// `Box<dyn IOSControl>` field with no per-method branching.
#[async_trait]
pub trait IOSControl: Send + Sync {
    async fn take_screenshot(&self) -> Result<Vec<u8>, DeviceError>;
    async fn tap(&self, x: f64, y: f64) -> Result<(), DeviceError>;
    async fn long_press(&self, x: f64, y: f64, duration_ms: u64) -> Result<(), DeviceError>;
    async fn swipe(&self, from: (f64, f64), to: (f64, f64), duration_ms: u64) -> Result<(), DeviceError>;
    async fn gesture(&self, actions: &[TapAction]) -> Result<(), DeviceError>;
    async fn send_keys(&self, text: &str) -> Result<(), DeviceError>;
    async fn press_button(&self, button: &str) -> Result<(), DeviceError>;
    async fn open_url(&self, url: &str) -> Result<(), DeviceError>;
    async fn get_source_elements(&self) -> Result<Vec<ScreenElement>, DeviceError>;
    async fn get_source_raw(&self) -> Result<String, DeviceError>;
    async fn get_orientation(&self) -> Result<Orientation, DeviceError>;
    async fn set_orientation(&self, orientation: Orientation) -> Result<(), DeviceError>;
    async fn get_window_size(&self) -> Result<WindowSize, DeviceError>;
    async fn get_foreground_app(&self) -> Result<ForegroundAppInfo, DeviceError>;
    async fn health_check(&self) -> Result<(), DeviceError>;
    async fn wait_for_ready(&self, timeout: Duration) -> Result<(), DeviceError>;
    async fn close(&self);

    /// Streams MJPEG frames, invoking `on_data` for each chunk; stops when
    /// `on_data` returns `false` or the underlying connection closes.
    async fn start_mjpeg_stream(
        &self,
        fps: u32,
        on_data: Box<dyn FnMut(Bytes) -> bool + Send>,
    ) -> Result<(), DeviceError>;

    /// Streams raw H.264/AVC bytes with the same stop semantics as
    /// `start_mjpeg_stream`.
    async fn start_h264_stream(
        &self,
        fps: u32,
        quality: u32,
        scale: f64,
        on_data: Box<dyn FnMut(Bytes) -> bool + Send>,
    ) -> Result<(), DeviceError>;
}
