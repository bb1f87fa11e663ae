//! Data models

pub mod api_level;
pub mod apps;
pub mod cache;
pub mod command;
pub mod device;
pub mod device_config;
pub mod device_info;
pub mod error;
pub mod platform;
pub mod screen;
pub mod sdk;

pub use apps::{ForegroundAppInfo, InstalledAppInfo};
pub use cache::{CachedDevice, DeviceCache};
pub use command::CommandResponse;
pub use device::{AndroidDevice, Device, DeviceKind, DeviceMetadata, DeviceState, DeviceStatus, IosDevice, IosRealDevice};
pub use error::{DeviceError, ErrorKind};
pub use platform::Platform;
pub use screen::{Orientation, Rect, ScreenElement, ScreenElementType, TapAction, TapActionKind, WindowSize};
