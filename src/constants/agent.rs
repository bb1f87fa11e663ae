//! Constants for the on-device agent bootstrap protocol (tunnels, port
//! forwarding, health-checks) shared by the iOS real-device and simulator
//! substrates.

use std::time::Duration;

/// Host port range a `PortForwarder` may allocate from for iOS real devices.
pub const PORT_FORWARD_RANGE_START: u16 = 13001;
pub const PORT_FORWARD_RANGE_END: u16 = 13400;

/// Fixed host port DeviceKit binds to on the simulator substrate, where no
/// port forwarding is needed.
pub const SIMULATOR_DEVICEKIT_PORT: u16 = 12004;

/// Interval between tunnel-refresh ticks for the embedded/process-supervised
/// tunnel manager.
pub const TUNNEL_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Poll interval while waiting for the agent's `/status` endpoint.
pub const AGENT_READY_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Upper bound on total time spent waiting for agent readiness.
pub const AGENT_READY_TIMEOUT: Duration = Duration::from_secs(20);

/// Upper bound on total time spent waiting for an emulator boot.
pub const EMULATOR_BOOT_TIMEOUT: Duration = Duration::from_secs(120);
pub const EMULATOR_BOOT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Upper bound on waiting for an app install to register with the package
/// manager / simctl.
pub const APP_INSTALL_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default per-call timeout for the REST-style (WDA) agent client.
pub const REST_CLIENT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default per-call timeout for the JSON-RPC (DeviceKit) agent client.
pub const JSONRPC_CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for UI-dump style calls on either agent client.
pub const JSONRPC_DUMP_TIMEOUT: Duration = Duration::from_secs(60);

/// Bundle identifier suffixes recognized as an installed agent app.
pub const WDA_BUNDLE_SUFFIX: &str = ".WebDriverAgent";
pub const DEVICEKIT_BUNDLE_PREFIX: &str = "dev.mobilecli.devicekit";

/// Entry point class `app_process` launches for the Android screen-capture
/// companion, resolved against the APK's on-device classpath via `pm path`.
pub const DEVICEKIT_SCREEN_CAPTURE_MAIN_CLASS: &str = "dev.mobilecli.devicekit.ScreenCaptureMain";

/// Environment variable overriding the path to the iOS device tool (go-ios).
pub const GO_IOS_PATH_ENV: &str = "GO_IOS_PATH";

/// Environment variable overriding the local DeviceKit build to install.
pub const DEVICEKIT_PATH_ENV: &str = "MOBILECLI_DEVICEKIT_PATH";
