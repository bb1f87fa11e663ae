//! Process-supervised tunnel management for iOS real devices.
//!
//! go-ios exposes a long-lived `tunnel` subcommand rather than a library we
//! can embed; `TunnelManager` spawns and tracks that child process per
//! device the same way `CommandRunner::spawn` is used everywhere else in
//! this codebase, rather than linking a tunneling library directly (see the
//! open-question resolution in the design notes).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::constants::agent::GO_IOS_PATH_ENV;
use crate::models::error::DeviceError;
use crate::utils::command_executor::CommandExecutor;

#[derive(Debug, Clone)]
struct ActiveTunnel {
    pid: u32,
}

/// Tracks one supervised tunnel process per device UDID.
#[derive(Clone)]
pub struct TunnelManager {
    executor: Arc<dyn CommandExecutor>,
    active: Arc<Mutex<HashMap<String, ActiveTunnel>>>,
}

impl TunnelManager {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            executor,
            active: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn go_ios_path(&self) -> PathBuf {
        std::env::var(GO_IOS_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("ios"))
    }

    pub fn is_active(&self, udid: &str) -> bool {
        self.active.lock().unwrap().contains_key(udid)
    }

    /// Starts (or reuses) a tunnel process for `udid`. Idempotent: a device
    /// that already has a tunnel running is left alone.
    pub async fn ensure_tunnel(&self, udid: &str) -> Result<(), DeviceError> {
        if self.is_active(udid) {
            return Ok(());
        }
        let tool = self.go_ios_path();
        let pid = self
            .executor
            .spawn(&tool, &["tunnel", "start", "--udid", udid])
            .await
            .map_err(|err| DeviceError::unavailable("ios tunnel", err.to_string()))?;
        self.active
            .lock()
            .unwrap()
            .insert(udid.to_string(), ActiveTunnel { pid });
        log::debug!("started tunnel for {udid} (pid {pid})");
        Ok(())
    }

    /// Stops the tunnel process for `udid`, if any, by sending it a kill
    /// signal through the OS. Errors are logged, not propagated, since this
    /// only ever runs from a shutdown hook.
    pub async fn teardown(&self, udid: &str) {
        let tunnel = self.active.lock().unwrap().remove(udid);
        let Some(tunnel) = tunnel else { return };
        #[cfg(unix)]
        {
            // SAFETY: libc::kill with a PID we ourselves spawned.
            unsafe {
                libc::kill(tunnel.pid as i32, libc::SIGTERM);
            }
        }
        #[cfg(not(unix))]
        {
            let _ = tunnel.pid;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::command_executor::mock::MockCommandExecutor;

    #[tokio::test]
    async fn ensure_tunnel_is_idempotent() {
        let executor = MockCommandExecutor::new().with_spawn_response(
            "ios",
            &["tunnel", "start", "--udid", "ABCD"],
            4242,
        );
        let manager = TunnelManager::new(Arc::new(executor.clone()));
        manager.ensure_tunnel("ABCD").await.unwrap();
        manager.ensure_tunnel("ABCD").await.unwrap();
        assert_eq!(executor.call_history().len(), 1);
        assert!(manager.is_active("ABCD"));
    }

    #[tokio::test]
    async fn teardown_clears_active_state() {
        let executor =
            MockCommandExecutor::new().with_spawn_response("ios", &["tunnel", "start", "--udid", "ABCD"], 1);
        let manager = TunnelManager::new(Arc::new(executor));
        manager.ensure_tunnel("ABCD").await.unwrap();
        manager.teardown("ABCD").await;
        assert!(!manager.is_active("ABCD"));
    }
}
