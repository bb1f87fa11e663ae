//! Device model definitions shared across the four substrates (Android
//! real/emulator, iOS real/simulator).
//!
//! `DeviceMetadata` is the substrate-agnostic identity every device exposes
//! regardless of platform; `AndroidDevice` and `IosDevice` carry the
//! substrate-specific fields the managers need on top of that.

use crate::constants::{android::DEFAULT_STORAGE_FALLBACK, defaults::DEFAULT_RAM_MB};
use crate::models::platform::Platform;
use serde::{Deserialize, Serialize};

/// Common interface for all device types.
pub trait Device: Send + Sync + std::fmt::Debug {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn status(&self) -> &DeviceStatus;
    fn is_running(&self) -> bool;
}

/// How a device is attached: a real, physically connected handset, an
/// Android emulator, or an iOS simulator. `(platform, device_type)` fully
/// determines which substrate implementation handles a given device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Real,
    Emulator,
    Simulator,
}

/// Whether a device is currently reachable through its platform tooling.
/// Distinct from `DeviceStatus`, which additionally tracks in-flight
/// transitions (`Starting`, `Stopping`, ...); `DeviceState` is the coarse
/// online/offline split operations gate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    Online,
    Offline,
}

impl From<DeviceStatus> for DeviceState {
    fn from(status: DeviceStatus) -> Self {
        match status {
            DeviceStatus::Running => DeviceState::Online,
            _ => DeviceState::Offline,
        }
    }
}

/// Substrate-agnostic device identity, returned by the aggregator and by
/// every device's `info` capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceMetadata {
    pub id: String,
    pub name: String,
    pub platform: Platform,
    pub device_type: DeviceKind,
    pub version: String,
    pub state: DeviceState,
    pub model: Option<String>,
}

/// Represents an Android Virtual Device (AVD) or a real Android handset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AndroidDevice {
    /// Stable identity: AVD name for emulators, transport id for real
    /// devices (see precedence rule in `transport_id`).
    pub name: String,
    /// Device type identifier (e.g., "pixel_7", "tv_1080p")
    pub device_type: String,
    /// Android API level (e.g., 34 for Android 14)
    pub api_level: u32,
    /// Current device status
    pub status: DeviceStatus,
    /// Whether the emulator is currently running
    pub is_running: bool,
    /// RAM allocation in MB (e.g., "2048")
    pub ram_size: String,
    /// Storage size (e.g., "8192M", "4G")
    pub storage_size: String,
    /// `adb` transport identifier (e.g. `emulator-5554`); empty when
    /// offline. Commands use this if present, else `name`.
    #[serde(default)]
    pub transport_id: String,
    /// `Real` for a physically attached handset, `Emulator` for an AVD.
    #[serde(default = "default_android_kind")]
    pub kind: DeviceKind,
}

fn default_android_kind() -> DeviceKind {
    DeviceKind::Emulator
}

impl AndroidDevice {
    /// Identity precedence per the data model: real devices use
    /// `transport_id` directly as their stable id; emulators use the AVD
    /// name (`self.name`) so identity survives transport-id churn across
    /// reboots.
    pub fn stable_id(&self) -> &str {
        match self.kind {
            DeviceKind::Real => &self.transport_id,
            _ => &self.name,
        }
    }

    /// The handle to pass to `adb -s <handle>`: transport id if known,
    /// else the stable id (useful before a transport id has been assigned).
    pub fn adb_target(&self) -> &str {
        if self.transport_id.is_empty() {
            self.stable_id()
        } else {
            &self.transport_id
        }
    }
}

/// Represents an iOS Simulator device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IosDevice {
    /// Display name of the simulator
    pub name: String,
    /// Unique device identifier (UUID)
    pub udid: String,
    /// Device type (e.g., "iPhone 15", "iPad Pro")
    pub device_type: String,
    /// iOS version number (e.g., "17.0")
    pub ios_version: String,
    /// Full runtime version string (e.g., "iOS 17.0")
    pub runtime_version: String,
    /// Current device status
    pub status: DeviceStatus,
    /// Whether the simulator is currently booted
    pub is_running: bool,
    /// Whether the device is available for use (not corrupted)
    pub is_available: bool,
    /// Cached agent endpoint port, once an agent has been started.
    #[serde(default)]
    pub agent_port: Option<u16>,
}

/// Represents a physically attached iOS device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IosRealDevice {
    pub name: String,
    pub udid: String,
    pub ios_version: String,
    pub status: DeviceStatus,
    pub is_running: bool,
    /// Host-side forwarded port once the agent bootstrap has run.
    #[serde(default)]
    pub agent_port: Option<u16>,
}

/// Represents the current operational state of a virtual device.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum DeviceStatus {
    Running,
    Stopped,
    Starting,
    Stopping,
    Creating,
    Error,
    Unknown,
}

impl Device for AndroidDevice {
    fn id(&self) -> &str {
        self.stable_id()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &DeviceStatus {
        &self.status
    }

    fn is_running(&self) -> bool {
        self.is_running
    }
}

impl Device for IosDevice {
    fn id(&self) -> &str {
        &self.udid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &DeviceStatus {
        &self.status
    }

    fn is_running(&self) -> bool {
        self.is_running
    }
}

impl Device for IosRealDevice {
    fn id(&self) -> &str {
        &self.udid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &DeviceStatus {
        &self.status
    }

    fn is_running(&self) -> bool {
        self.is_running
    }
}

impl Default for AndroidDevice {
    fn default() -> Self {
        Self {
            name: String::new(),
            device_type: String::new(),
            api_level: 0,
            status: DeviceStatus::Stopped,
            is_running: false,
            ram_size: DEFAULT_RAM_MB.to_string(),
            storage_size: DEFAULT_STORAGE_FALLBACK.to_string(),
            transport_id: String::new(),
            kind: DeviceKind::Emulator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emulator_stable_id_is_avd_name_not_transport_id() {
        let device = AndroidDevice {
            name: "Pixel_7_API_34".into(),
            transport_id: "emulator-5554".into(),
            kind: DeviceKind::Emulator,
            ..Default::default()
        };
        assert_eq!(device.stable_id(), "Pixel_7_API_34");
        assert_eq!(device.adb_target(), "emulator-5554");
    }

    #[test]
    fn real_device_stable_id_is_transport_id() {
        let device = AndroidDevice {
            name: "ignored".into(),
            transport_id: "R58N30ABCDE".into(),
            kind: DeviceKind::Real,
            ..Default::default()
        };
        assert_eq!(device.stable_id(), "R58N30ABCDE");
    }

    #[test]
    fn device_state_from_status() {
        assert_eq!(DeviceState::from(DeviceStatus::Running), DeviceState::Online);
        assert_eq!(DeviceState::from(DeviceStatus::Stopped), DeviceState::Offline);
        assert_eq!(DeviceState::from(DeviceStatus::Unknown), DeviceState::Offline);
    }
}
