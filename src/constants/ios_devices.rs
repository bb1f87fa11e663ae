/// iOS device-specific constants
// Display size string replacements
pub const DISPLAY_SIZE_13_INCH: &str = "13 inch";
pub const DISPLAY_SIZE_13_INCH_SHORT: &str = "13\"";
pub const DISPLAY_SIZE_11_INCH: &str = "11 inch";
pub const DISPLAY_SIZE_11_INCH_SHORT: &str = "11\"";

// Pattern constants for string replacement
pub const INCH_13_PATTERN: &str = "13 inch";
pub const INCH_13_REPLACEMENT: &str = "13\"";
pub const INCH_11_PATTERN: &str = "11 inch";
pub const INCH_11_REPLACEMENT: &str = "11\"";

// Memory size indicators
pub const MEMORY_8GB_INDICATOR: &str = "8GB";
pub const MEMORY_8GB_FORMATTED: &str = "(8GB)";
pub const MEMORY_16GB_INDICATOR: &str = "16GB";
pub const MEMORY_16GB_FORMATTED: &str = "(16GB)";

// Memory pattern constants for string replacement
pub const MEMORY_8GB_PATTERN: &str = "8GB";
pub const MEMORY_8GB_REPLACEMENT: &str = "(8GB)";
pub const MEMORY_16GB_PATTERN: &str = "16GB";
pub const MEMORY_16GB_REPLACEMENT: &str = "(16GB)";

// iOS batch processing
pub const IOS_DEVICE_BATCH_SIZE: usize = 10;
