//! Host-side TCP port allocation for the iOS real-device agent tunnel.
//!
//! One forwarded port is held per device for the lifetime of a bootstrap; a
//! process-wide `PortForwarder` hands out the first free port in
//! [`PORT_FORWARD_RANGE_START`, `PORT_FORWARD_RANGE_END`] and tracks which
//! device currently owns it so a second bootstrap for the same device
//! reuses its existing forward instead of leaking another one.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use crate::constants::agent::{PORT_FORWARD_RANGE_END, PORT_FORWARD_RANGE_START};
use crate::models::error::DeviceError;

#[derive(Debug, Default, Clone)]
pub struct PortForwarder {
    inner: Arc<Mutex<HashMap<String, u16>>>,
}

impl PortForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the port already allocated to `device_id`, if any.
    pub fn allocated_for(&self, device_id: &str) -> Option<u16> {
        self.inner.lock().unwrap().get(device_id).copied()
    }

    /// Allocates the first free port in range for `device_id`, or returns
    /// the port it already owns.
    pub fn allocate(&self, device_id: &str) -> Result<u16, DeviceError> {
        if let Some(port) = self.allocated_for(device_id) {
            return Ok(port);
        }
        let mut guard = self.inner.lock().unwrap();
        let taken: std::collections::HashSet<u16> = guard.values().copied().collect();
        for candidate in PORT_FORWARD_RANGE_START..=PORT_FORWARD_RANGE_END {
            if taken.contains(&candidate) {
                continue;
            }
            if TcpListener::bind(("127.0.0.1", candidate)).is_ok() {
                guard.insert(device_id.to_string(), candidate);
                return Ok(candidate);
            }
        }
        Err(DeviceError::unavailable(
            "port forward range",
            "no free host port in range 13001-13400",
        ))
    }

    pub fn release(&self, device_id: &str) {
        self.inner.lock().unwrap().remove(device_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_is_idempotent_per_device() {
        let forwarder = PortForwarder::new();
        let first = forwarder.allocate("device-a").unwrap();
        let second = forwarder.allocate("device-a").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn different_devices_get_different_ports() {
        let forwarder = PortForwarder::new();
        let a = forwarder.allocate("device-a").unwrap();
        let b = forwarder.allocate("device-b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn release_frees_the_port_for_reuse() {
        let forwarder = PortForwarder::new();
        let port = forwarder.allocate("device-a").unwrap();
        forwarder.release("device-a");
        assert!(forwarder.allocated_for("device-a").is_none());
        let reused = forwarder.allocate("device-b").unwrap();
        assert_eq!(reused, port);
    }
}
