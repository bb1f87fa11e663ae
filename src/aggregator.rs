//! Cross-substrate device enumeration and resolution.
//!
//! Ties the three managers (Android covers both real handsets and
//! emulators; iOS simulator and iOS real device are separate substrates)
//! into the single `devices`/auto-select surface the CLI and server share.

use std::sync::Arc;
use std::time::Instant;

use crate::managers::common::DeviceManager;
use crate::managers::{AndroidManager, IosManager, IosRealManager};
use crate::models::cache::{CachedDevice, DeviceCache};
use crate::models::error::DeviceError;

#[derive(Clone)]
pub struct DeviceAggregator {
    android: Arc<AndroidManager>,
    ios_simulator: Arc<IosManager>,
    ios_real: Arc<IosRealManager>,
    cache: DeviceCache,
}

impl DeviceAggregator {
    pub fn new(android: Arc<AndroidManager>, ios_simulator: Arc<IosManager>, ios_real: Arc<IosRealManager>) -> Self {
        Self {
            android,
            ios_simulator,
            ios_real,
            cache: DeviceCache::new(),
        }
    }

    pub fn cache(&self) -> &DeviceCache {
        &self.cache
    }

    async fn enumerate<M, D, F>(label: &str, manager: &M, wrap: F) -> Vec<CachedDevice>
    where
        M: DeviceManager<Device = D>,
        F: Fn(D) -> CachedDevice,
    {
        let started = Instant::now();
        match manager.list_devices().await {
            Ok(devices) => {
                log::debug!("{label} enumeration found {} device(s) in {:?}", devices.len(), started.elapsed());
                devices.into_iter().map(wrap).collect()
            }
            Err(err) => {
                log::warn!("{label} enumeration failed, contributing zero devices: {err}");
                Vec::new()
            }
        }
    }

    /// Runs the three enumerators concurrently, merges their results, and
    /// repopulates the cache. A failing enumerator contributes zero devices
    /// rather than failing the whole call.
    pub async fn list_all(&self, include_offline: bool) -> Vec<CachedDevice> {
        let (android, ios_simulator, ios_real) = tokio::join!(
            Self::enumerate("android", self.android.as_ref(), CachedDevice::Android),
            Self::enumerate("ios simulator", self.ios_simulator.as_ref(), CachedDevice::IosSimulator),
            Self::enumerate("ios real device", self.ios_real.as_ref(), CachedDevice::IosReal),
        );

        let mut devices: Vec<CachedDevice> = android
            .into_iter()
            .chain(ios_simulator)
            .chain(ios_real)
            .collect();

        if !include_offline {
            devices.retain(CachedDevice::is_running);
        }

        for device in &devices {
            self.cache.insert(device.clone());
        }
        devices
    }

    /// Resolves a command's target device: an explicit id is looked up
    /// (cache first, then a fresh enumeration); with no id, exactly one
    /// online device auto-selects, zero or many is an error listing what
    /// was found.
    pub async fn resolve(&self, device_id: Option<&str>) -> Result<CachedDevice, DeviceError> {
        if let Some(id) = device_id {
            if let Some(cached) = self.cache.get(id) {
                return Ok(cached);
            }
            let all = self.list_all(true).await;
            return all
                .into_iter()
                .find(|d| d.id() == id)
                .ok_or_else(|| DeviceError::not_found(id));
        }

        let online = self.list_all(false).await;
        match online.len() {
            0 => Err(DeviceError::precondition("no online devices")),
            1 => {
                let device = online.into_iter().next().expect("len checked above");
                self.cache.insert(device.clone());
                Ok(device)
            }
            _ => {
                let ids: Vec<&str> = online.iter().map(|d| d.id()).collect();
                Err(DeviceError::precondition(format!(
                    "multiple devices found: [{}]",
                    ids.join(", ")
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::command_executor::mock::MockCommandExecutor;

    fn aggregator_with_no_devices() -> DeviceAggregator {
        let android = Arc::new(AndroidManager::with_executor(Arc::new(MockCommandExecutor::new())).unwrap());
        let ios_simulator = Arc::new(IosManager::with_executor(Arc::new(MockCommandExecutor::new())).unwrap_or_else(|_| {
            panic!("iOS manager construction requires xcrun on macOS test runners")
        }));
        let ios_real = Arc::new(IosRealManager::with_executor(Arc::new(MockCommandExecutor::new())));
        DeviceAggregator::new(android, ios_simulator, ios_real)
    }

    #[tokio::test]
    #[cfg(target_os = "macos")]
    async fn resolve_with_no_devices_is_an_error() {
        let aggregator = aggregator_with_no_devices();
        let result = aggregator.resolve(None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    #[cfg(target_os = "macos")]
    async fn resolve_unknown_explicit_id_is_not_found() {
        let aggregator = aggregator_with_no_devices();
        let result = aggregator.resolve(Some("nonexistent")).await;
        assert!(matches!(result, Err(DeviceError::NotFound { .. })));
    }
}
