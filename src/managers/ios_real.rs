//! Physically attached iOS device management via go-ios.
//!
//! `simctl` only reaches simulators; go-ios is the tool this core shells
//! out to for real hardware, the same way `IosManager` shells out to
//! `simctl`. The interesting part of this substrate is the agent bootstrap
//! path: probe, verify the agent app is installed, bring up a tunnel and a
//! forwarded port, launch the app, and poll until it answers.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::agent::{jsonrpc::DeviceKitClient, rest::WdaClient, IOSControl};
use crate::constants::agent::{DEVICEKIT_BUNDLE_PREFIX, GO_IOS_PATH_ENV, WDA_BUNDLE_SUFFIX};
use crate::lifecycle::{bootstrap_real_device_transport, wait_for_agent_ready, PortForwarder, ShutdownHooks, TunnelManager};
use crate::managers::common::DeviceManager;
use crate::models::device::{DeviceStatus, IosRealDevice};
use crate::models::error::DeviceError;
use crate::utils::command::CommandRunner;
use crate::utils::command_executor::CommandExecutor;

type AgentClients = Arc<tokio::sync::Mutex<HashMap<String, Arc<dyn IOSControl>>>>;

#[derive(Clone)]
pub struct IosRealManager {
    command_executor: Arc<dyn CommandExecutor>,
    tunnel: TunnelManager,
    port_forwarder: PortForwarder,
    hooks: Arc<ShutdownHooks>,
    agent_clients: AgentClients,
}

impl IosRealManager {
    pub fn new() -> Self {
        Self::with_executor(Arc::new(CommandRunner::new()))
    }

    pub fn with_executor(executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            tunnel: TunnelManager::new(executor.clone()),
            port_forwarder: PortForwarder::new(),
            hooks: Arc::new(ShutdownHooks::new()),
            command_executor: executor,
            agent_clients: Arc::new(tokio::sync::Mutex::new(HashMap::new())),
        }
    }

    /// Exposes the registry so the process shutdown path can run every
    /// tunnel/port-forward cleanup this manager accumulated.
    pub fn shutdown_hooks(&self) -> Arc<ShutdownHooks> {
        self.hooks.clone()
    }

    fn go_ios_path(&self) -> PathBuf {
        std::env::var(GO_IOS_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("ios"))
    }

    async fn device_udids(&self) -> Result<Vec<String>> {
        let output = self
            .command_executor
            .run(&self.go_ios_path(), &["list"])
            .await
            .context("failed to list attached iOS devices")?;
        let json: Value =
            serde_json::from_str(&output).context("failed to parse go-ios device list")?;
        Ok(json
            .get("deviceList")
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
            .unwrap_or_default())
    }

    async fn device_info(&self, udid: &str) -> Result<IosRealDevice> {
        let output = self
            .command_executor
            .run(&self.go_ios_path(), &["info", "--udid", udid])
            .await
            .context("failed to fetch device info")?;
        let json: Value =
            serde_json::from_str(&output).context("failed to parse go-ios device info")?;
        let name = json
            .get("DeviceName")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown")
            .to_string();
        let ios_version = json
            .get("ProductVersion")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        Ok(IosRealDevice {
            name,
            udid: udid.to_string(),
            ios_version,
            status: DeviceStatus::Running,
            is_running: true,
            agent_port: None,
        })
    }

    async fn installed_bundle_ids(&self, udid: &str) -> Result<Vec<String>> {
        let output = self
            .command_executor
            .run(&self.go_ios_path(), &["apps", "--udid", udid, "--list"])
            .await
            .context("failed to list installed apps")?;
        let json: Value = serde_json::from_str(&output).unwrap_or(Value::Null);
        Ok(json
            .as_array()
            .map(|apps| {
                apps.iter()
                    .filter_map(|app| app.get("CFBundleIdentifier").and_then(|v| v.as_str()).map(str::to_string))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn agent_bundle_id(bundle_ids: &[String]) -> Option<&str> {
        bundle_ids
            .iter()
            .find(|id| id.ends_with(WDA_BUNDLE_SUFFIX) || id.starts_with(DEVICEKIT_BUNDLE_PREFIX))
            .map(String::as_str)
    }

    /// Runs the agent bootstrap path: reuse a healthy cached client, else
    /// verify the agent app is installed, bring up tunnel + port forward,
    /// launch the app, and poll `/status` until ready.
    async fn bootstrap_agent(&self, udid: &str) -> Result<Arc<dyn IOSControl>> {
        {
            let clients = self.agent_clients.lock().await;
            if let Some(client) = clients.get(udid) {
                if client.health_check().await.is_ok() {
                    return Ok(client.clone());
                }
            }
        }

        let bundle_ids = self.installed_bundle_ids(udid).await?;
        let bundle_id = Self::agent_bundle_id(&bundle_ids)
            .ok_or_else(|| {
                DeviceError::unavailable(
                    "agent app",
                    "neither WebDriverAgent nor DeviceKit is installed on this device",
                )
            })?
            .to_string();

        let port =
            bootstrap_real_device_transport(udid, &self.tunnel, &self.port_forwarder, &self.hooks)
                .await?;

        self.command_executor
            .run(&self.go_ios_path(), &["launch", &bundle_id, "--udid", udid])
            .await
            .context("failed to launch the agent app")?;

        let client: Arc<dyn IOSControl> = if bundle_id.ends_with(WDA_BUNDLE_SUFFIX) {
            Arc::new(WdaClient::new(format!("http://127.0.0.1:{port}")))
        } else {
            let ws_url = format!("ws://127.0.0.1:{port}/ws");
            let http_base = format!("http://127.0.0.1:{port}");
            Arc::new(DeviceKitClient::connect(&ws_url, http_base).await?)
        };
        wait_for_agent_ready(|| client.health_check())
            .await
            .context("agent never became ready")?;

        self.agent_clients.lock().await.insert(udid.to_string(), client.clone());
        Ok(client)
    }

    async fn agent_client(&self, udid: &str) -> Result<Arc<dyn IOSControl>> {
        if let Some(client) = self.agent_clients.lock().await.get(udid) {
            return Ok(client.clone());
        }
        self.bootstrap_agent(udid).await
    }

    pub async fn tap(&self, udid: &str, x: f64, y: f64) -> Result<()> {
        Ok(self.agent_client(udid).await?.tap(x, y).await?)
    }

    pub async fn long_press(&self, udid: &str, x: f64, y: f64, duration_ms: u64) -> Result<()> {
        Ok(self.agent_client(udid).await?.long_press(x, y, duration_ms).await?)
    }

    pub async fn swipe(
        &self,
        udid: &str,
        from: (f64, f64),
        to: (f64, f64),
        duration_ms: u64,
    ) -> Result<()> {
        Ok(self.agent_client(udid).await?.swipe(from, to, duration_ms).await?)
    }

    pub async fn gesture(&self, udid: &str, actions: &[crate::models::TapAction]) -> Result<()> {
        Ok(self.agent_client(udid).await?.gesture(actions).await?)
    }

    pub async fn send_keys(&self, udid: &str, text: &str) -> Result<()> {
        Ok(self.agent_client(udid).await?.send_keys(text).await?)
    }

    pub async fn press_button(&self, udid: &str, button: &str) -> Result<()> {
        Ok(self.agent_client(udid).await?.press_button(button).await?)
    }

    pub async fn take_screenshot(&self, udid: &str) -> Result<Vec<u8>> {
        Ok(self.agent_client(udid).await?.take_screenshot().await?)
    }

    pub async fn dump_source_raw(&self, udid: &str) -> Result<String> {
        Ok(self.agent_client(udid).await?.get_source_raw().await?)
    }

    pub async fn dump_source_elements(&self, udid: &str) -> Result<Vec<crate::models::ScreenElement>> {
        Ok(self.agent_client(udid).await?.get_source_elements().await?)
    }

    pub async fn get_orientation(&self, udid: &str) -> Result<crate::models::Orientation> {
        Ok(self.agent_client(udid).await?.get_orientation().await?)
    }

    pub async fn set_orientation(
        &self,
        udid: &str,
        orientation: crate::models::Orientation,
    ) -> Result<()> {
        Ok(self.agent_client(udid).await?.set_orientation(orientation).await?)
    }

    pub async fn get_window_size(&self, udid: &str) -> Result<crate::models::screen::WindowSize> {
        Ok(self.agent_client(udid).await?.get_window_size().await?)
    }

    pub async fn foreground_app(&self, udid: &str) -> Result<crate::models::ForegroundAppInfo> {
        Ok(self.agent_client(udid).await?.get_foreground_app().await?)
    }

    pub async fn stream_mjpeg(
        &self,
        udid: &str,
        fps: u32,
        on_data: Box<dyn FnMut(bytes::Bytes) -> bool + Send>,
    ) -> Result<()> {
        Ok(self.agent_client(udid).await?.start_mjpeg_stream(fps, on_data).await?)
    }

    pub async fn stream_h264(
        &self,
        udid: &str,
        fps: u32,
        quality: u32,
        scale: f64,
        on_data: Box<dyn FnMut(bytes::Bytes) -> bool + Send>,
    ) -> Result<()> {
        Ok(self
            .agent_client(udid)
            .await?
            .start_h264_stream(fps, quality, scale, on_data)
            .await?)
    }

    pub async fn list_apps(&self, udid: &str) -> Result<Vec<crate::models::InstalledAppInfo>> {
        Ok(self
            .installed_bundle_ids(udid)
            .await?
            .into_iter()
            .map(|bundle_id| crate::models::InstalledAppInfo {
                bundle_id,
                name: None,
                version: None,
            })
            .collect())
    }

    pub async fn install_app(&self, udid: &str, app_path: &std::path::Path) -> Result<()> {
        self.command_executor
            .run(
                &self.go_ios_path(),
                &["install", "--path", &app_path.to_string_lossy(), "--udid", udid],
            )
            .await?;
        Ok(())
    }

    pub async fn uninstall_app(&self, udid: &str, bundle_id: &str) -> Result<()> {
        self.command_executor
            .run(&self.go_ios_path(), &["uninstall", bundle_id, "--udid", udid])
            .await?;
        Ok(())
    }

    pub async fn launch_app(&self, udid: &str, bundle_id: &str) -> Result<()> {
        self.command_executor
            .run(&self.go_ios_path(), &["launch", bundle_id, "--udid", udid])
            .await?;
        Ok(())
    }

    pub async fn terminate_app(&self, udid: &str, bundle_id: &str) -> Result<()> {
        self.command_executor
            .run(&self.go_ios_path(), &["kill", bundle_id, "--udid", udid])
            .await?;
        Ok(())
    }

    pub async fn open_url(&self, udid: &str, url: &str) -> Result<()> {
        Ok(self.agent_client(udid).await?.open_url(url).await?)
    }
}

impl Default for IosRealManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceManager for IosRealManager {
    type Device = IosRealDevice;

    async fn list_devices(&self) -> Result<Vec<Self::Device>> {
        let udids = self.device_udids().await?;
        let mut devices = Vec::with_capacity(udids.len());
        for udid in udids {
            devices.push(self.device_info(&udid).await?);
        }
        Ok(devices)
    }

    /// A real device can't be powered on by this tool; "starting" it means
    /// ensuring the on-device agent is bootstrapped and ready.
    async fn start_device(&self, identifier: &str) -> Result<()> {
        self.bootstrap_agent(identifier).await?;
        Ok(())
    }

    /// There is no software shutdown for a physically attached device; the
    /// cached agent connection is dropped so the next capability call
    /// re-bootstraps, but the tunnel and port forward are left running
    /// since other in-flight operations may still depend on them.
    async fn stop_device(&self, identifier: &str) -> Result<()> {
        self.agent_clients.lock().await.remove(identifier);
        Ok(())
    }

    async fn is_available(&self) -> bool {
        which::which(self.go_ios_path()).is_ok()
    }
}

#[async_trait::async_trait]
impl crate::managers::common::UnifiedDeviceManager for IosRealManager {
    async fn list_devices(&self) -> Result<Vec<Box<dyn crate::models::device::Device>>> {
        let devices = <Self as DeviceManager>::list_devices(self).await?;
        Ok(devices
            .into_iter()
            .map(|d| Box::new(d) as Box<dyn crate::models::device::Device>)
            .collect())
    }

    async fn start_device(&self, device_id: &str) -> Result<()> {
        <Self as DeviceManager>::start_device(self, device_id).await
    }

    async fn stop_device(&self, device_id: &str) -> Result<()> {
        <Self as DeviceManager>::stop_device(self, device_id).await
    }

    async fn is_available(&self) -> bool {
        <Self as DeviceManager>::is_available(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::command_executor::mock::MockCommandExecutor;

    #[tokio::test]
    async fn list_devices_parses_go_ios_output() {
        let executor = MockCommandExecutor::new()
            .with_success("ios", &["list"], r#"{"deviceList":["AAAA","BBBB"]}"#)
            .with_success(
                "ios",
                &["info", "--udid", "AAAA"],
                r#"{"DeviceName":"Jane's iPhone","ProductVersion":"17.4"}"#,
            )
            .with_success(
                "ios",
                &["info", "--udid", "BBBB"],
                r#"{"DeviceName":"Test Rig","ProductVersion":"16.2"}"#,
            );
        let manager = IosRealManager::with_executor(Arc::new(executor));
        let devices = manager.list_devices().await.unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name, "Jane's iPhone");
        assert_eq!(devices[0].ios_version, "17.4");
    }

    #[test]
    fn agent_bundle_id_prefers_first_recognized_match() {
        let bundles = vec![
            "com.apple.mobilesafari".to_string(),
            "com.example.WebDriverAgent".to_string(),
        ];
        assert_eq!(
            IosRealManager::agent_bundle_id(&bundles),
            Some("com.example.WebDriverAgent")
        );
    }

    #[test]
    fn agent_bundle_id_none_when_neither_installed() {
        let bundles = vec!["com.apple.mobilesafari".to_string()];
        assert_eq!(IosRealManager::agent_bundle_id(&bundles), None);
    }

    #[tokio::test]
    async fn stop_device_drops_cached_client_without_erroring() {
        let executor = MockCommandExecutor::new();
        let manager = IosRealManager::with_executor(Arc::new(executor));
        manager.stop_device("AAAA").await.unwrap();
    }
}
