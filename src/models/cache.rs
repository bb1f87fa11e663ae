//! Process-wide device cache.
//!
//! Populated on first successful resolution, keyed by stable device id, and
//! never invalidated by OS-level state changes: a device that goes offline
//! between a `find` and a later operation surfaces as whatever error the
//! platform tool itself returns, not a cache miss.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::device::{AndroidDevice, IosDevice, IosRealDevice};

/// One of the four substrate device records, cached by stable id.
#[derive(Debug, Clone)]
pub enum CachedDevice {
    Android(AndroidDevice),
    IosSimulator(IosDevice),
    IosReal(IosRealDevice),
}

impl CachedDevice {
    pub fn id(&self) -> &str {
        match self {
            Self::Android(d) => d.stable_id(),
            Self::IosSimulator(d) => &d.udid,
            Self::IosReal(d) => &d.udid,
        }
    }

    pub fn is_running(&self) -> bool {
        match self {
            Self::Android(d) => crate::models::device::Device::is_running(d),
            Self::IosSimulator(d) => crate::models::device::Device::is_running(d),
            Self::IosReal(d) => crate::models::device::Device::is_running(d),
        }
    }

    /// Substrate-agnostic identity view, for the `device_info` capability
    /// and the `devices` enumeration response.
    pub fn to_metadata(&self) -> crate::models::device::DeviceMetadata {
        use crate::models::device::{DeviceKind, DeviceMetadata, DeviceState};
        use crate::models::platform::Platform;

        match self {
            Self::Android(d) => DeviceMetadata {
                id: d.stable_id().to_string(),
                name: d.name.clone(),
                platform: Platform::Android,
                device_type: d.kind,
                version: d.api_level.to_string(),
                state: DeviceState::from(d.status),
                model: Some(d.device_type.clone()),
            },
            Self::IosSimulator(d) => DeviceMetadata {
                id: d.udid.clone(),
                name: d.name.clone(),
                platform: Platform::Ios,
                device_type: DeviceKind::Simulator,
                version: d.ios_version.clone(),
                state: DeviceState::from(d.status),
                model: Some(d.device_type.clone()),
            },
            Self::IosReal(d) => DeviceMetadata {
                id: d.udid.clone(),
                name: d.name.clone(),
                platform: Platform::Ios,
                device_type: DeviceKind::Real,
                version: d.ios_version.clone(),
                state: DeviceState::from(d.status),
                model: None,
            },
        }
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    devices: HashMap<String, CachedDevice>,
}

/// Process-wide map keyed by device id. Cloning a `DeviceCache` shares the
/// underlying map (it's an `Arc<Mutex<_>>`), matching the singleton usage
/// described in the design notes.
#[derive(Debug, Clone, Default)]
pub struct DeviceCache {
    inner: Arc<Mutex<CacheInner>>,
}

impl DeviceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<CachedDevice> {
        self.inner.lock().unwrap().devices.get(id).cloned()
    }

    pub fn insert(&self, device: CachedDevice) {
        let id = device.id().to_string();
        self.inner.lock().unwrap().devices.insert(id, device);
    }

    pub fn remove(&self, id: &str) {
        self.inner.lock().unwrap().devices.remove(id);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::device::DeviceStatus;

    #[test]
    fn insert_and_get_round_trips() {
        let cache = DeviceCache::new();
        let device = IosDevice {
            name: "iPhone 15".into(),
            udid: "ABCD".into(),
            device_type: "iPhone-15".into(),
            ios_version: "17.0".into(),
            runtime_version: "iOS 17.0".into(),
            status: DeviceStatus::Running,
            is_running: true,
            is_available: true,
            agent_port: None,
        };
        cache.insert(CachedDevice::IosSimulator(device));
        assert_eq!(cache.len(), 1);
        let fetched = cache.get("ABCD").expect("cached");
        assert_eq!(fetched.id(), "ABCD");
    }

    #[test]
    fn clone_shares_storage() {
        let cache = DeviceCache::new();
        let clone = cache.clone();
        clone.insert(CachedDevice::IosReal(IosRealDevice {
            name: "iPhone".into(),
            udid: "X".into(),
            ios_version: "18.0".into(),
            status: DeviceStatus::Running,
            is_running: true,
            agent_port: Some(13001),
        }));
        assert_eq!(cache.len(), 1);
    }
}
