//! mobilecli - a control plane for Android and iOS devices.
//!
//! Unifies four device substrates (Android real/emulator, iOS
//! simulator/real) behind one command surface, reachable from the CLI
//! directly or from the JSON-RPC server over HTTP and WebSocket.
//!
//! # Architecture Overview
//!
//! - [`managers`] - per-substrate device management (boot, install, wipe...)
//! - [`agent`] - clients for the on-device agent protocols (WDA, DeviceKit)
//! - [`lifecycle`] - agent bootstrap: tunnels, port forwarding, shutdown hooks
//! - [`aggregator`] - cross-substrate device enumeration and resolution
//! - [`command`] - request/response types shared by the CLI and the server
//! - [`server`] - JSON-RPC dispatcher, HTTP and WebSocket transports
//! - [`models`] - core data structures and domain models
//! - [`config`] - configuration loading
//! - [`utils`] - shared utilities for command execution and logging
//! - [`constants`] - application-wide constants

pub mod aggregator;
pub mod agent;
pub mod command;
pub mod config;
pub mod constants;
pub mod lifecycle;
pub mod managers;
pub mod models;
pub mod server;
pub mod utils;

pub use aggregator::DeviceAggregator;
pub use config::Config;
