//! mobilecli - a control plane for Android and iOS devices.
//!
//! Every subcommand resolves a target device through the same aggregator
//! the JSON-RPC server uses, prints a `CommandResponse` as JSON, and exits
//! non-zero on any error.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use mobilecli::command::{
    BundleParams, CommandContext, InstallParams, LongPressParams, OrientationSetParams, ScreenCaptureFormat,
    SwipeParams, TapParams, TextParams, UrlParams,
};
use mobilecli::config::Config;
use mobilecli::managers::{AndroidManager, IosManager, IosRealManager};
use mobilecli::models::{CommandResponse, DeviceKind, Orientation, Platform};
use mobilecli::server;

#[derive(Parser)]
#[command(name = "mobilecli", version, about = "A control plane for Android and iOS devices")]
struct Cli {
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lists devices across every substrate.
    Devices {
        #[arg(long)]
        include_offline: bool,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long = "type")]
        device_type: Option<String>,
    },
    /// Inspects or power-cycles a single device.
    Device {
        #[command(subcommand)]
        action: DeviceAction,
        #[arg(long)]
        device: Option<String>,
    },
    /// Manages installed apps on a device.
    Apps {
        #[command(subcommand)]
        action: AppsAction,
        #[arg(long)]
        device: Option<String>,
    },
    /// Synthesizes input on a device.
    Io {
        #[command(subcommand)]
        action: IoAction,
    },
    /// Captures a single still frame.
    Screenshot {
        #[arg(long)]
        device: Option<String>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Streams a live screen-capture feed to stdout.
    Screencapture {
        #[arg(long)]
        device: Option<String>,
        #[arg(long, default_value = "mjpeg")]
        format: String,
    },
    /// Dumps the current view hierarchy.
    Dump {
        #[command(subcommand)]
        action: DumpAction,
    },
    /// Opens a URL on a device.
    Url {
        url: String,
        #[arg(long)]
        device: Option<String>,
    },
    /// Runs the JSON-RPC server.
    Server {
        #[command(subcommand)]
        action: ServerAction,
    },
    /// Prints a shell completion script.
    Completions {
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum DeviceAction {
    Info,
    Boot,
    Shutdown,
    Reboot,
    Orientation {
        #[command(subcommand)]
        action: OrientationAction,
    },
}

#[derive(Subcommand)]
enum OrientationAction {
    Get,
    Set { value: String },
}

#[derive(Subcommand)]
enum AppsAction {
    List,
    Foreground,
    Launch { bundle: String },
    Terminate { bundle: String },
    Install { path: String },
    Uninstall { bundle: String },
}

#[derive(Subcommand)]
enum IoAction {
    Tap {
        coords: String,
        #[arg(long)]
        device: Option<String>,
    },
    Longpress {
        coords: String,
        #[arg(long)]
        device: Option<String>,
        #[arg(long, default_value_t = 500)]
        duration_ms: u64,
    },
    Swipe {
        coords: String,
        #[arg(long)]
        device: Option<String>,
        #[arg(long, default_value_t = 300)]
        duration_ms: u64,
    },
    Text {
        text: String,
        #[arg(long)]
        device: Option<String>,
    },
    Button {
        button: String,
        #[arg(long)]
        device: Option<String>,
    },
}

#[derive(Subcommand)]
enum DumpAction {
    Ui {
        #[arg(long)]
        device: Option<String>,
        #[arg(long, default_value = "elements")]
        format: String,
    },
}

#[derive(Subcommand)]
enum ServerAction {
    Start {
        #[arg(long)]
        listen: Option<String>,
        #[arg(long)]
        cors: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .format_timestamp_secs()
        .init();

    if let Command::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load(None)?;
    let ctx = build_context()?;

    let response = run(&cli.command, &config, &ctx).await;
    let is_ok = response.is_ok();
    println!("{}", serde_json::to_string_pretty(&response)?);
    if !is_ok {
        std::process::exit(1);
    }
    Ok(())
}

fn build_context() -> Result<CommandContext> {
    let android = Arc::new(AndroidManager::new()?);
    let ios_simulator = Arc::new(IosManager::new()?);
    let ios_real = Arc::new(IosRealManager::new());
    Ok(CommandContext::new(android, ios_simulator, ios_real))
}

async fn run(command: &Command, config: &Config, ctx: &CommandContext) -> CommandResponse {
    match dispatch(command, config, ctx).await {
        Ok(response) => response,
        Err(err) => err.into(),
    }
}

async fn dispatch(command: &Command, config: &Config, ctx: &CommandContext) -> Result<CommandResponse> {
    match command {
        Command::Devices {
            include_offline,
            platform,
            device_type,
        } => {
            let mut devices = ctx.devices(*include_offline).await?;
            if let Some(platform) = platform {
                let wanted = parse_platform(platform)?;
                devices.retain(|d| d.platform == wanted);
            }
            if let Some(device_type) = device_type {
                let wanted = parse_device_kind(device_type)?;
                devices.retain(|d| d.device_type == wanted);
            }
            Ok(CommandResponse::ok(devices))
        }
        Command::Device { action, device } => device_command(action, device.as_deref(), ctx).await,
        Command::Apps { action, device } => apps_command(action, device.as_deref(), ctx).await,
        Command::Io { action } => io_command(action, ctx).await,
        Command::Screenshot { device, output } => {
            let bytes = ctx.screenshot(device.as_deref()).await?;
            match output.as_deref() {
                None | Some("-") => {
                    std::io::stdout().write_all(&bytes)?;
                    Ok(CommandResponse::ok(serde_json::json!({ "bytes": bytes.len() })))
                }
                Some(path) => {
                    std::fs::write(path, &bytes)?;
                    Ok(CommandResponse::ok(serde_json::json!({ "path": path })))
                }
            }
        }
        Command::Screencapture { device, format } => {
            let format: ScreenCaptureFormat = format.parse().map_err(anyhow::Error::msg)?;
            let mut stdout = std::io::stdout();
            let on_data: Box<dyn FnMut(bytes::Bytes) -> bool + Send> = Box::new(move |chunk| {
                stdout.write_all(&chunk).is_ok() && stdout.flush().is_ok()
            });
            ctx.screencapture(device.as_deref(), format, on_data).await?;
            Ok(CommandResponse::ok(serde_json::json!({ "status": "stream ended" })))
        }
        Command::Dump { action } => dump_command(action, ctx).await,
        Command::Url { url, device } => {
            ctx.url(UrlParams {
                device_id: device.clone(),
                url: url.clone(),
            })
            .await?;
            Ok(CommandResponse::ok(serde_json::json!({})))
        }
        Command::Server { action } => server_command(action, config, ctx).await,
        Command::Completions { .. } => unreachable!("handled before dispatch"),
    }
}

async fn device_command(action: &DeviceAction, device: Option<&str>, ctx: &CommandContext) -> Result<CommandResponse> {
    let device_id = device.map(str::to_string);
    match action {
        DeviceAction::Info => Ok(CommandResponse::ok(ctx.device_info(device).await?)),
        DeviceAction::Boot => {
            let id = require_device(device)?;
            ctx.device_boot(&id).await?;
            Ok(CommandResponse::ok(serde_json::json!({})))
        }
        DeviceAction::Shutdown => {
            let id = require_device(device)?;
            ctx.device_shutdown(&id).await?;
            Ok(CommandResponse::ok(serde_json::json!({})))
        }
        DeviceAction::Reboot => {
            let id = require_device(device)?;
            ctx.device_reboot(&id).await?;
            Ok(CommandResponse::ok(serde_json::json!({})))
        }
        DeviceAction::Orientation { action } => match action {
            OrientationAction::Get => Ok(CommandResponse::ok(ctx.io_orientation_get(device).await?)),
            OrientationAction::Set { value } => {
                let orientation = parse_orientation(value)?;
                ctx.io_orientation_set(OrientationSetParams {
                    device_id: device_id.clone(),
                    orientation,
                })
                .await?;
                Ok(CommandResponse::ok(serde_json::json!({})))
            }
        },
    }
}

async fn apps_command(action: &AppsAction, device: Option<&str>, ctx: &CommandContext) -> Result<CommandResponse> {
    let device_id = device.map(str::to_string);
    match action {
        AppsAction::List => Ok(CommandResponse::ok(ctx.apps_list(device).await?)),
        AppsAction::Foreground => Ok(CommandResponse::ok(ctx.apps_foreground(device).await?)),
        AppsAction::Launch { bundle } => {
            ctx.apps_launch(BundleParams {
                device_id: device_id.clone(),
                bundle_id: bundle.clone(),
            })
            .await?;
            Ok(CommandResponse::ok(serde_json::json!({})))
        }
        AppsAction::Terminate { bundle } => {
            ctx.apps_terminate(BundleParams {
                device_id: device_id.clone(),
                bundle_id: bundle.clone(),
            })
            .await?;
            Ok(CommandResponse::ok(serde_json::json!({})))
        }
        AppsAction::Install { path } => {
            ctx.apps_install(InstallParams {
                device_id: device_id.clone(),
                path: path.clone(),
            })
            .await?;
            Ok(CommandResponse::ok(serde_json::json!({})))
        }
        AppsAction::Uninstall { bundle } => {
            ctx.apps_uninstall(BundleParams {
                device_id: device_id.clone(),
                bundle_id: bundle.clone(),
            })
            .await?;
            Ok(CommandResponse::ok(serde_json::json!({})))
        }
    }
}

async fn io_command(action: &IoAction, ctx: &CommandContext) -> Result<CommandResponse> {
    match action {
        IoAction::Tap { coords, device } => {
            let (x, y) = parse_pair(coords)?;
            ctx.io_tap(TapParams {
                device_id: device.clone(),
                x,
                y,
            })
            .await?;
            Ok(CommandResponse::ok(serde_json::json!({})))
        }
        IoAction::Longpress {
            coords,
            device,
            duration_ms,
        } => {
            let (x, y) = parse_pair(coords)?;
            ctx.io_longpress(LongPressParams {
                device_id: device.clone(),
                x,
                y,
                duration_ms: *duration_ms,
            })
            .await?;
            Ok(CommandResponse::ok(serde_json::json!({})))
        }
        IoAction::Swipe {
            coords,
            device,
            duration_ms,
        } => {
            let parts: Vec<f64> = coords
                .split(',')
                .map(|p| p.trim().parse::<f64>())
                .collect::<Result<_, _>>()
                .map_err(|_| anyhow::anyhow!("swipe coordinates must be X1,Y1,X2,Y2"))?;
            let [x1, y1, x2, y2]: [f64; 4] = parts
                .try_into()
                .map_err(|_| anyhow::anyhow!("swipe coordinates must be X1,Y1,X2,Y2"))?;
            ctx.io_swipe(SwipeParams {
                device_id: device.clone(),
                x1,
                y1,
                x2,
                y2,
                duration_ms: *duration_ms,
            })
            .await?;
            Ok(CommandResponse::ok(serde_json::json!({})))
        }
        IoAction::Text { text, device } => {
            ctx.io_text(TextParams {
                device_id: device.clone(),
                text: text.clone(),
            })
            .await?;
            Ok(CommandResponse::ok(serde_json::json!({})))
        }
        IoAction::Button { button, device } => {
            ctx.io_button(mobilecli::command::ButtonParams {
                device_id: device.clone(),
                button: button.clone(),
            })
            .await?;
            Ok(CommandResponse::ok(serde_json::json!({})))
        }
    }
}

async fn dump_command(action: &DumpAction, ctx: &CommandContext) -> Result<CommandResponse> {
    match action {
        DumpAction::Ui { device, format } if format == "raw" => Ok(CommandResponse::ok(serde_json::json!({
            "raw": ctx.dump_ui_raw(device.as_deref()).await?
        }))),
        DumpAction::Ui { device, .. } => Ok(CommandResponse::ok(ctx.dump_ui(device.as_deref()).await?)),
    }
}

async fn server_command(action: &ServerAction, config: &Config, ctx: &CommandContext) -> Result<CommandResponse> {
    match action {
        ServerAction::Start { listen, cors } => {
            let mut server_config = config.server.clone();
            if let Some(listen) = listen {
                match listen.rsplit_once(':') {
                    Some((host, port)) => {
                        server_config.host = host.to_string();
                        server_config.port = port.parse().map_err(|_| anyhow::anyhow!("invalid port in --listen"))?;
                    }
                    None => {
                        server_config.port = listen.parse().map_err(|_| anyhow::anyhow!("invalid port in --listen"))?;
                    }
                }
            }
            server_config.cors = server_config.cors || *cors;
            server::serve(&server_config, ctx.clone()).await?;
            Ok(CommandResponse::ok(serde_json::json!({})))
        }
    }
}

fn require_device(device: Option<&str>) -> Result<String> {
    device
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("--device is required for this command"))
}

fn parse_pair(coords: &str) -> Result<(f64, f64)> {
    let mut parts = coords.split(',').map(|p| p.trim().parse::<f64>());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) => Ok((x, y)),
        _ => Err(anyhow::anyhow!("coordinates must be X,Y")),
    }
}

fn parse_orientation(value: &str) -> Result<Orientation> {
    match value.to_ascii_lowercase().as_str() {
        "portrait" => Ok(Orientation::Portrait),
        "landscape" => Ok(Orientation::Landscape),
        other => Err(anyhow::anyhow!("unknown orientation: {other}")),
    }
}

fn parse_platform(value: &str) -> Result<Platform> {
    match value.to_ascii_lowercase().as_str() {
        "android" => Ok(Platform::Android),
        "ios" => Ok(Platform::Ios),
        other => Err(anyhow::anyhow!("unknown platform: {other}")),
    }
}

fn parse_device_kind(value: &str) -> Result<DeviceKind> {
    match value.to_ascii_lowercase().as_str() {
        "real" => Ok(DeviceKind::Real),
        "emulator" => Ok(DeviceKind::Emulator),
        "simulator" => Ok(DeviceKind::Simulator),
        other => Err(anyhow::anyhow!("unknown device type: {other}")),
    }
}

