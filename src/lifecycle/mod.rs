//! On-device agent lifecycle: process-supervised tunnels, port forwarding,
//! the bootstrap sequence that ties them together, and the shutdown hook
//! registry that undoes them.

pub mod bootstrap;
pub mod portforward;
pub mod shutdown;
pub mod tunnel;

pub use bootstrap::{bootstrap_real_device_transport, poll_until_ready, wait_for_agent_ready};
pub use portforward::PortForwarder;
pub use shutdown::ShutdownHooks;
pub use tunnel::TunnelManager;
