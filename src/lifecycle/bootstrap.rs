//! Ties tunnel, port-forward, and agent-client setup together into the
//! ordered bootstrap sequence used by both iOS substrates, and registers
//! the cleanup hooks each step needs torn down later.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::constants::agent::{AGENT_READY_POLL_INTERVAL, AGENT_READY_TIMEOUT};
use crate::lifecycle::portforward::PortForwarder;
use crate::lifecycle::shutdown::ShutdownHooks;
use crate::lifecycle::tunnel::TunnelManager;
use crate::models::error::DeviceError;

/// Polls `check` at a fixed interval until it succeeds or `timeout` elapses.
/// Used by both agent clients' `wait_for_ready` and by the real-device
/// bootstrap step that waits for `/status` after launching the agent app.
pub async fn poll_until_ready<F, Fut>(timeout: Duration, mut check: F) -> Result<(), DeviceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), DeviceError>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        match check().await {
            Ok(()) => return Ok(()),
            Err(_) if Instant::now() < deadline => {
                tokio::time::sleep(AGENT_READY_POLL_INTERVAL).await;
            }
            Err(_) => {
                return Err(DeviceError::timeout("agent readiness", timeout.as_secs()));
            }
        }
    }
}

/// Bootstraps an iOS real-device agent connection: ensures a tunnel,
/// allocates a forwarded port, and registers the matching teardown hooks.
/// Launching the agent app and waiting for `/status` is substrate-specific
/// and happens in the caller once it has the forwarded port.
pub async fn bootstrap_real_device_transport(
    udid: &str,
    tunnel: &TunnelManager,
    port_forwarder: &PortForwarder,
    hooks: &ShutdownHooks,
) -> Result<u16, DeviceError> {
    tunnel.ensure_tunnel(udid).await?;
    let port = port_forwarder.allocate(udid)?;

    let udid_owned = udid.to_string();
    let tunnel = tunnel.clone();
    hooks.register(format!("ios-tunnel:{udid_owned}"), move || async move {
        tunnel.teardown(&udid_owned).await;
        Ok(())
    });

    let udid_owned = udid.to_string();
    let port_forwarder = port_forwarder.clone();
    hooks.register(format!("ios-portforward:{udid_owned}"), move || async move {
        port_forwarder.release(&udid_owned);
        Ok(())
    });

    Ok(port)
}

/// Waits up to [`AGENT_READY_TIMEOUT`] for an agent's health check to
/// succeed after the agent app has been launched.
pub async fn wait_for_agent_ready<F, Fut>(check: F) -> Result<(), DeviceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), DeviceError>>,
{
    poll_until_ready(AGENT_READY_TIMEOUT, check).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::command_executor::mock::MockCommandExecutor;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn poll_until_ready_succeeds_once_check_passes() {
        let attempts = AtomicU32::new(0);
        let result = poll_until_ready(Duration::from_millis(50), || async {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            if n < 1 {
                Err(DeviceError::other("not yet"))
            } else {
                Ok(())
            }
        })
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn poll_until_ready_times_out() {
        let result = poll_until_ready(Duration::from_millis(10), || async {
            Err(DeviceError::other("never"))
        })
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn bootstrap_real_device_transport_registers_hooks() {
        let executor = Arc::new(
            MockCommandExecutor::new().with_spawn_response("ios", &["tunnel", "start", "--udid", "ABCD"], 1),
        );
        let tunnel = TunnelManager::new(executor);
        let port_forwarder = PortForwarder::new();
        let hooks = ShutdownHooks::new();

        let port = bootstrap_real_device_transport("ABCD", &tunnel, &port_forwarder, &hooks)
            .await
            .unwrap();
        assert!(port >= crate::constants::agent::PORT_FORWARD_RANGE_START);
        assert_eq!(hooks.len(), 2);

        hooks.run_all().await;
        assert!(!tunnel.is_active("ABCD"));
        assert!(port_forwarder.allocated_for("ABCD").is_none());
    }
}
