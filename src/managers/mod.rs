//! Device managers module

pub mod android;
pub mod common;
pub mod ios;
pub mod ios_real;

pub use android::AndroidManager;
pub use ios::IosManager;
pub use ios_real::IosRealManager;
