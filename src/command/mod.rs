//! Request/response types and the dispatch layer shared by the CLI and the
//! JSON-RPC server. Every operation here validates its own input, resolves
//! its target device through the aggregator, and returns a typed
//! `Result<_, DeviceError>` — callers decide how to present that (a
//! `CommandResponse` for the CLI, a JSON-RPC envelope for the server).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::aggregator::DeviceAggregator;
use crate::lifecycle::shutdown::ShutdownHooks;
use crate::managers::common::DeviceManager;
use crate::managers::{AndroidManager, IosManager, IosRealManager};
use crate::models::cache::CachedDevice;
use crate::models::device::DeviceMetadata;
use crate::models::error::DeviceError;
use crate::models::screen::{Orientation, ScreenElement, TapAction, WindowSize};
use crate::models::{ForegroundAppInfo, InstalledAppInfo};
use crate::utils::validation::{validate_coordinates, validate_send_keys, validate_url, DevicePlatform};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TapParams {
    #[serde(default)]
    pub device_id: Option<String>,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeParams {
    #[serde(default)]
    pub device_id: Option<String>,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default = "default_swipe_duration_ms")]
    pub duration_ms: u64,
}

fn default_swipe_duration_ms() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextParams {
    #[serde(default)]
    pub device_id: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonParams {
    #[serde(default)]
    pub device_id: Option<String>,
    pub button: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureParams {
    #[serde(default)]
    pub device_id: Option<String>,
    pub actions: Vec<TapAction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlParams {
    #[serde(default)]
    pub device_id: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationSetParams {
    #[serde(default)]
    pub device_id: Option<String>,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleParams {
    #[serde(default)]
    pub device_id: Option<String>,
    pub bundle_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallParams {
    #[serde(default)]
    pub device_id: Option<String>,
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceIdParams {
    #[serde(default)]
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongPressParams {
    #[serde(default)]
    pub device_id: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_long_press_duration_ms")]
    pub duration_ms: u64,
}

fn default_long_press_duration_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Serialize)]
pub struct DumpUiResult {
    pub elements: Vec<ScreenElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenCaptureFormat {
    Mjpeg,
    Avc,
    #[serde(rename = "avc+replay-kit")]
    AvcReplayKit,
}

impl std::str::FromStr for ScreenCaptureFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mjpeg" => Ok(Self::Mjpeg),
            "avc" => Ok(Self::Avc),
            "avc+replay-kit" => Ok(Self::AvcReplayKit),
            other => Err(format!("unknown screen-capture format: {other}")),
        }
    }
}

/// Which substrate owns a resolved device, and the identifier its manager
/// expects (adb transport id for Android, UDID for either iOS substrate).
enum Target {
    Android(Arc<AndroidManager>, String),
    IosSimulator(Arc<IosManager>, String),
    IosReal(Arc<IosRealManager>, String),
}

#[derive(Clone)]
pub struct CommandContext {
    android: Arc<AndroidManager>,
    ios_simulator: Arc<IosManager>,
    ios_real: Arc<IosRealManager>,
    aggregator: DeviceAggregator,
}

impl CommandContext {
    pub fn new(
        android: Arc<AndroidManager>,
        ios_simulator: Arc<IosManager>,
        ios_real: Arc<IosRealManager>,
    ) -> Self {
        let aggregator = DeviceAggregator::new(android.clone(), ios_simulator.clone(), ios_real.clone());
        Self {
            android,
            ios_simulator,
            ios_real,
            aggregator,
        }
    }

    pub fn aggregator(&self) -> &DeviceAggregator {
        &self.aggregator
    }

    /// Only the real-device substrate accumulates tunnel/port-forward
    /// cleanup; Android and the simulator have nothing to tear down.
    pub fn shutdown_hooks(&self) -> Arc<ShutdownHooks> {
        self.ios_real.shutdown_hooks()
    }

    async fn target(&self, device_id: Option<&str>) -> Result<Target, DeviceError> {
        let device = self.aggregator.resolve(device_id).await?;
        Ok(match device {
            CachedDevice::Android(d) => Target::Android(self.android.clone(), d.adb_target().to_string()),
            CachedDevice::IosSimulator(d) => Target::IosSimulator(self.ios_simulator.clone(), d.udid),
            CachedDevice::IosReal(d) => Target::IosReal(self.ios_real.clone(), d.udid),
        })
    }

    pub async fn devices(&self, include_offline: bool) -> Result<Vec<DeviceMetadata>, DeviceError> {
        Ok(self
            .aggregator
            .list_all(include_offline)
            .await
            .iter()
            .map(CachedDevice::to_metadata)
            .collect())
    }

    pub async fn device_info(&self, device_id: Option<&str>) -> Result<DeviceMetadata, DeviceError> {
        Ok(self.aggregator.resolve(device_id).await?.to_metadata())
    }

    pub async fn device_boot(&self, device_id: &str) -> Result<(), DeviceError> {
        match self.target(Some(device_id)).await? {
            Target::Android(mgr, id) => mgr.start_device(&id).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.start_device(&id).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.start_device(&id).await.map_err(device_error),
        }
    }

    pub async fn device_shutdown(&self, device_id: &str) -> Result<(), DeviceError> {
        match self.target(Some(device_id)).await? {
            Target::Android(mgr, id) => mgr.stop_device(&id).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.stop_device(&id).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.stop_device(&id).await.map_err(device_error),
        }
    }

    pub async fn device_reboot(&self, device_id: &str) -> Result<(), DeviceError> {
        self.device_shutdown(device_id).await?;
        self.device_boot(device_id).await
    }

    pub async fn io_tap(&self, params: TapParams) -> Result<(), DeviceError> {
        validate_coordinates(params.x, params.y).map_err(DeviceError::invalid_argument)?;
        match self.target(params.device_id.as_deref()).await? {
            Target::Android(mgr, id) => mgr.tap(&id, params.x, params.y).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.tap(&id, params.x, params.y).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.tap(&id, params.x, params.y).await.map_err(device_error),
        }
    }

    pub async fn io_longpress(&self, params: LongPressParams) -> Result<(), DeviceError> {
        validate_coordinates(params.x, params.y).map_err(DeviceError::invalid_argument)?;
        match self.target(params.device_id.as_deref()).await? {
            Target::Android(mgr, id) => mgr
                .long_press(&id, params.x, params.y, params.duration_ms)
                .await
                .map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr
                .long_press(&id, params.x, params.y, params.duration_ms)
                .await
                .map_err(device_error),
            Target::IosReal(mgr, id) => mgr
                .long_press(&id, params.x, params.y, params.duration_ms)
                .await
                .map_err(device_error),
        }
    }

    pub async fn io_swipe(&self, params: SwipeParams) -> Result<(), DeviceError> {
        validate_coordinates(params.x1, params.y1).map_err(DeviceError::invalid_argument)?;
        validate_coordinates(params.x2, params.y2).map_err(DeviceError::invalid_argument)?;
        match self.target(params.device_id.as_deref()).await? {
            Target::Android(mgr, id) => mgr
                .swipe(&id, (params.x1, params.y1), (params.x2, params.y2), params.duration_ms)
                .await
                .map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr
                .swipe(&id, (params.x1, params.y1), (params.x2, params.y2), params.duration_ms)
                .await
                .map_err(device_error),
            Target::IosReal(mgr, id) => mgr
                .swipe(&id, (params.x1, params.y1), (params.x2, params.y2), params.duration_ms)
                .await
                .map_err(device_error),
        }
    }

    pub async fn io_text(&self, params: TextParams) -> Result<(), DeviceError> {
        let platform = match self.aggregator.resolve(params.device_id.as_deref()).await? {
            CachedDevice::Android(_) => DevicePlatform::Android,
            _ => DevicePlatform::Ios,
        };
        validate_send_keys(&params.text, platform).map_err(DeviceError::invalid_argument)?;
        match self.target(params.device_id.as_deref()).await? {
            Target::Android(mgr, id) => mgr.send_keys(&id, &params.text).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.send_keys(&id, &params.text).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.send_keys(&id, &params.text).await.map_err(device_error),
        }
    }

    pub async fn io_button(&self, params: ButtonParams) -> Result<(), DeviceError> {
        match self.target(params.device_id.as_deref()).await? {
            Target::Android(mgr, id) => mgr.press_button(&id, &params.button).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.press_button(&id, &params.button).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.press_button(&id, &params.button).await.map_err(device_error),
        }
    }

    pub async fn io_gesture(&self, params: GestureParams) -> Result<(), DeviceError> {
        match self.target(params.device_id.as_deref()).await? {
            Target::Android(_, _) => Err(DeviceError::precondition(
                "multi-step gestures require an agent; Android input is limited to tap/swipe/longpress",
            )),
            Target::IosSimulator(mgr, id) => mgr.gesture(&id, &params.actions).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.gesture(&id, &params.actions).await.map_err(device_error),
        }
    }

    pub async fn url(&self, params: UrlParams) -> Result<(), DeviceError> {
        validate_url(&params.url).map_err(DeviceError::invalid_argument)?;
        match self.target(params.device_id.as_deref()).await? {
            Target::Android(mgr, id) => mgr.open_url(&id, &params.url).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.open_url(&id, &params.url).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.open_url(&id, &params.url).await.map_err(device_error),
        }
    }

    pub async fn io_orientation_get(&self, device_id: Option<&str>) -> Result<Orientation, DeviceError> {
        match self.target(device_id).await? {
            Target::Android(mgr, id) => mgr.get_orientation(&id).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.get_orientation(&id).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.get_orientation(&id).await.map_err(device_error),
        }
    }

    pub async fn io_orientation_set(&self, params: OrientationSetParams) -> Result<(), DeviceError> {
        match self.target(params.device_id.as_deref()).await? {
            Target::Android(mgr, id) => mgr.set_orientation(&id, params.orientation).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.set_orientation(&id, params.orientation).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.set_orientation(&id, params.orientation).await.map_err(device_error),
        }
    }

    pub async fn get_window_size(&self, device_id: Option<&str>) -> Result<WindowSize, DeviceError> {
        match self.target(device_id).await? {
            Target::Android(_, _) => Err(DeviceError::precondition(
                "window size is only exposed through an agent; Android reports resolution via `device info`",
            )),
            Target::IosSimulator(mgr, id) => mgr.get_window_size(&id).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.get_window_size(&id).await.map_err(device_error),
        }
    }

    pub async fn dump_ui(&self, device_id: Option<&str>) -> Result<DumpUiResult, DeviceError> {
        let elements = match self.target(device_id).await? {
            Target::Android(mgr, id) => mgr.dump_source_elements(&id).await.map_err(device_error)?,
            Target::IosSimulator(mgr, id) => mgr.dump_source_elements(&id).await.map_err(device_error)?,
            Target::IosReal(mgr, id) => mgr.dump_source_elements(&id).await.map_err(device_error)?,
        };
        Ok(DumpUiResult { elements })
    }

    pub async fn dump_ui_raw(&self, device_id: Option<&str>) -> Result<String, DeviceError> {
        match self.target(device_id).await? {
            Target::Android(mgr, id) => mgr.dump_source_raw(&id).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.dump_source_raw(&id).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.dump_source_raw(&id).await.map_err(device_error),
        }
    }

    /// Streams screen-capture bytes to `on_data` until it returns `false` or
    /// the underlying producer exits. `avc+replay-kit` is only meaningful
    /// on a physically attached device.
    pub async fn screencapture(
        &self,
        device_id: Option<&str>,
        format: ScreenCaptureFormat,
        on_data: Box<dyn FnMut(bytes::Bytes) -> bool + Send>,
    ) -> Result<(), DeviceError> {
        const DEFAULT_FPS: u32 = 10;
        const DEFAULT_H264_FPS: u32 = 30;
        const DEFAULT_H264_QUALITY: u32 = 70;
        const DEFAULT_H264_SCALE: f64 = 1.0;

        match (self.target(device_id).await?, format) {
            (Target::Android(mgr, id), ScreenCaptureFormat::AvcReplayKit) => {
                let _ = (mgr, id);
                Err(DeviceError::precondition(
                    "avc+replay-kit capture is only available on a physically attached iOS device",
                ))
            }
            (Target::Android(mgr, id), _) => {
                let class_path = mgr.devicekit_apk_class_path(&id).await.map_err(device_error)?;
                mgr.stream_screen_capture(
                    &id,
                    &class_path,
                    crate::constants::agent::DEVICEKIT_SCREEN_CAPTURE_MAIN_CLASS,
                    on_data,
                )
                .await
                .map_err(device_error)
            }
            (Target::IosSimulator(_, _), ScreenCaptureFormat::AvcReplayKit) => Err(DeviceError::precondition(
                "avc+replay-kit capture is only available on a physically attached iOS device",
            )),
            (Target::IosSimulator(mgr, id), ScreenCaptureFormat::Mjpeg) => {
                mgr.stream_mjpeg(&id, DEFAULT_FPS, on_data).await.map_err(device_error)
            }
            (Target::IosSimulator(mgr, id), ScreenCaptureFormat::Avc) => mgr
                .stream_h264(&id, DEFAULT_H264_FPS, DEFAULT_H264_QUALITY, DEFAULT_H264_SCALE, on_data)
                .await
                .map_err(device_error),
            (Target::IosReal(mgr, id), ScreenCaptureFormat::Mjpeg) => {
                mgr.stream_mjpeg(&id, DEFAULT_FPS, on_data).await.map_err(device_error)
            }
            (Target::IosReal(mgr, id), ScreenCaptureFormat::Avc | ScreenCaptureFormat::AvcReplayKit) => mgr
                .stream_h264(&id, DEFAULT_H264_FPS, DEFAULT_H264_QUALITY, DEFAULT_H264_SCALE, on_data)
                .await
                .map_err(device_error),
        }
    }

    pub async fn screenshot(&self, device_id: Option<&str>) -> Result<Vec<u8>, DeviceError> {
        match self.target(device_id).await? {
            Target::Android(mgr, id) => mgr.take_screenshot(&id).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.take_screenshot(&id).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.take_screenshot(&id).await.map_err(device_error),
        }
    }

    pub async fn apps_list(&self, device_id: Option<&str>) -> Result<Vec<InstalledAppInfo>, DeviceError> {
        match self.target(device_id).await? {
            Target::Android(mgr, id) => mgr.list_apps(&id).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.list_apps(&id).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.list_apps(&id).await.map_err(device_error),
        }
    }

    pub async fn apps_foreground(&self, device_id: Option<&str>) -> Result<ForegroundAppInfo, DeviceError> {
        match self.target(device_id).await? {
            Target::Android(mgr, id) => mgr.foreground_app(&id).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.foreground_app(&id).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.foreground_app(&id).await.map_err(device_error),
        }
    }

    pub async fn apps_launch(&self, params: BundleParams) -> Result<(), DeviceError> {
        match self.target(params.device_id.as_deref()).await? {
            Target::Android(mgr, id) => mgr.launch_app(&id, &params.bundle_id).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.launch_app(&id, &params.bundle_id).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.launch_app(&id, &params.bundle_id).await.map_err(device_error),
        }
    }

    pub async fn apps_terminate(&self, params: BundleParams) -> Result<(), DeviceError> {
        match self.target(params.device_id.as_deref()).await? {
            Target::Android(mgr, id) => mgr.terminate_app(&id, &params.bundle_id).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.terminate_app(&id, &params.bundle_id).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.terminate_app(&id, &params.bundle_id).await.map_err(device_error),
        }
    }

    pub async fn apps_install(&self, params: InstallParams) -> Result<(), DeviceError> {
        let path = std::path::Path::new(&params.path);
        match self.target(params.device_id.as_deref()).await? {
            Target::Android(mgr, id) => mgr.install_app(&id, path).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.install_app(&id, path).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.install_app(&id, path).await.map_err(device_error),
        }
    }

    pub async fn apps_uninstall(&self, params: BundleParams) -> Result<(), DeviceError> {
        match self.target(params.device_id.as_deref()).await? {
            Target::Android(mgr, id) => mgr.uninstall_app(&id, &params.bundle_id).await.map_err(device_error),
            Target::IosSimulator(mgr, id) => mgr.uninstall_app(&id, &params.bundle_id).await.map_err(device_error),
            Target::IosReal(mgr, id) => mgr.uninstall_app(&id, &params.bundle_id).await.map_err(device_error),
        }
    }
}

/// Collapses an `anyhow::Error` onto `DeviceError`, reusing the wrapped
/// variant when the failure already carries one rather than flattening it
/// into a generic message.
fn device_error(err: anyhow::Error) -> DeviceError {
    match err.downcast::<DeviceError>() {
        Ok(device_err) => device_err,
        Err(err) => DeviceError::other(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::command_executor::mock::MockCommandExecutor;

    fn context() -> CommandContext {
        let android = Arc::new(AndroidManager::with_executor(Arc::new(MockCommandExecutor::new())).unwrap());
        let ios_simulator = Arc::new(
            IosManager::with_executor(Arc::new(MockCommandExecutor::new()))
                .expect("iOS manager construction requires xcrun on macOS test runners"),
        );
        let ios_real = Arc::new(IosRealManager::with_executor(Arc::new(MockCommandExecutor::new())));
        CommandContext::new(android, ios_simulator, ios_real)
    }

    #[tokio::test]
    #[cfg(target_os = "macos")]
    async fn tap_rejects_negative_coordinates_before_resolving_a_device() {
        let ctx = context();
        let result = ctx
            .io_tap(TapParams {
                device_id: Some("whatever".into()),
                x: -1.0,
                y: 10.0,
            })
            .await;
        assert!(matches!(result, Err(DeviceError::InvalidArgument { message }) if message.contains("coordinates must be non-negative")));
    }

    #[tokio::test]
    #[cfg(target_os = "macos")]
    async fn url_rejects_empty_string() {
        let ctx = context();
        let result = ctx
            .url(UrlParams {
                device_id: Some("whatever".into()),
                url: String::new(),
            })
            .await;
        assert!(result.is_err());
    }
}
