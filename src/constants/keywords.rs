/// Keywords and detection strings for various features
// Log level detection keywords
pub const LOG_LEVEL_ERROR: &str = "Error";
pub const LOG_LEVEL_ERROR_LOWER: &str = "error";
pub const LOG_LEVEL_WARNING: &str = "Warning";
pub const LOG_LEVEL_FAILED: &str = "Failed";

// Device type detection keywords - Brands
pub const DEVICE_KEYWORD_PIXEL: &str = "pixel";
pub const DEVICE_KEYWORD_NEXUS: &str = "nexus";
pub const DEVICE_KEYWORD_GALAXY: &str = "galaxy";
pub const DEVICE_KEYWORD_ONEPLUS: &str = "oneplus";

// Device type detection keywords - Apple devices
pub const DEVICE_KEYWORD_IPHONE: &str = "iphone";
pub const DEVICE_KEYWORD_IPAD: &str = "ipad";
pub const DEVICE_KEYWORD_WATCH: &str = "watch";

// Device type detection keywords - Models
pub const DEVICE_KEYWORD_PRO: &str = "pro";
pub const DEVICE_KEYWORD_PLUS: &str = "plus";
pub const DEVICE_KEYWORD_MAX: &str = "max";
pub const DEVICE_KEYWORD_MINI: &str = "mini";
pub const DEVICE_KEYWORD_ULTRA: &str = "ultra";
pub const DEVICE_KEYWORD_SERIES: &str = "series";

// Device type detection keywords - Form factors
pub const DEVICE_KEYWORD_FOLD: &str = "fold";
pub const DEVICE_KEYWORD_FLIP: &str = "flip";
pub const DEVICE_KEYWORD_TABLET: &str = "tablet";
pub const DEVICE_KEYWORD_PAD: &str = "pad";
pub const DEVICE_KEYWORD_PHONE: &str = "phone";
pub const DEVICE_KEYWORD_WEAR: &str = "wear";

// Device type detection keywords - Sizes
pub const DEVICE_KEYWORD_10_INCH: &str = "10 inch";
pub const DEVICE_KEYWORD_11_INCH: &str = "11 inch";
pub const DEVICE_KEYWORD_12_INCH: &str = "12 inch";
pub const DEVICE_KEYWORD_5_INCH: &str = "5 inch";
pub const DEVICE_KEYWORD_6_INCH: &str = "6 inch";

// Device type detection keywords - TV/Display
pub const DEVICE_KEYWORD_TV: &str = "tv";
pub const DEVICE_KEYWORD_1080P: &str = "1080p";
pub const DEVICE_KEYWORD_4K: &str = "4k";

// Device type detection keywords - Automotive
pub const DEVICE_KEYWORD_AUTO: &str = "auto";
pub const DEVICE_KEYWORD_CAR: &str = "car";

// Device type detection keywords - Wear/Watch
pub const DEVICE_KEYWORD_ROUND: &str = "round";

// Device type detection keywords - Apple specific
pub const DEVICE_KEYWORD_SE: &str = "se";
pub const DEVICE_KEYWORD_AIR: &str = "air";

// Device type detection keywords - Manufacturer names
pub const DEVICE_KEYWORD_GOOGLE: &str = "google";
pub const DEVICE_KEYWORD_SAMSUNG: &str = "samsung";
pub const DEVICE_KEYWORD_XIAOMI: &str = "xiaomi";
pub const DEVICE_KEYWORD_ASUS: &str = "asus";
pub const DEVICE_KEYWORD_OPPO: &str = "oppo";
pub const DEVICE_KEYWORD_VIVO: &str = "vivo";
pub const DEVICE_KEYWORD_HUAWEI: &str = "huawei";
pub const DEVICE_KEYWORD_MOTOROLA: &str = "motorola";
pub const DEVICE_KEYWORD_LENOVO: &str = "lenovo";
pub const DEVICE_KEYWORD_SONY: &str = "sony";

// Device type detection keywords - Screen sizes for iOS
pub const DEVICE_KEYWORD_12_9: &str = "12.9";
pub const DEVICE_KEYWORD_11: &str = "11";
