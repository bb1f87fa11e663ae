/// Device resolution constants for iOS devices
// iPhone resolutions
pub const IPHONE_15_PRO_MAX_RESOLUTION: &str = "1290x2796";
pub const IPHONE_15_PRO_RESOLUTION: &str = "1179x2556";
pub const IPHONE_15_RESOLUTION: &str = "1179x2556";
pub const IPHONE_14_PRO_MAX_RESOLUTION: &str = "1290x2796";
pub const IPHONE_14_PRO_RESOLUTION: &str = "1179x2556";
pub const IPHONE_14_PLUS_RESOLUTION: &str = "1284x2778";
pub const IPHONE_14_RESOLUTION: &str = "1170x2532";
pub const IPHONE_13_PRO_MAX_RESOLUTION: &str = "1284x2778";
pub const IPHONE_13_PRO_RESOLUTION: &str = "1170x2532";
pub const IPHONE_13_RESOLUTION: &str = "1170x2532";
pub const IPHONE_13_MINI_RESOLUTION: &str = "1080x2340";
pub const IPHONE_12_PRO_MAX_RESOLUTION: &str = "1284x2778";
pub const IPHONE_12_PRO_RESOLUTION: &str = "1170x2532";
pub const IPHONE_12_RESOLUTION: &str = "1170x2532";
pub const IPHONE_12_MINI_RESOLUTION: &str = "1080x2340";
pub const IPHONE_11_PRO_MAX_RESOLUTION: &str = "1242x2688";
pub const IPHONE_11_PRO_RESOLUTION: &str = "1125x2436";
pub const IPHONE_11_RESOLUTION: &str = "828x1792";
pub const IPHONE_XS_MAX_RESOLUTION: &str = "1242x2688";
pub const IPHONE_XS_RESOLUTION: &str = "1125x2436";
pub const IPHONE_XR_RESOLUTION: &str = "828x1792";
pub const IPHONE_X_RESOLUTION: &str = "1125x2436";
pub const IPHONE_8_PLUS_RESOLUTION: &str = "1242x2208";
pub const IPHONE_8_RESOLUTION: &str = "750x1334";
pub const IPHONE_7_PLUS_RESOLUTION: &str = "1242x2208";
pub const IPHONE_7_RESOLUTION: &str = "750x1334";
pub const IPHONE_SE_3RD_RESOLUTION: &str = "750x1334";
pub const IPHONE_SE_2ND_RESOLUTION: &str = "750x1334";
pub const IPHONE_SE_1ST_RESOLUTION: &str = "640x1136";

// iPad resolutions
pub const IPAD_PRO_12_9_6TH_RESOLUTION: &str = "2048x2732";
pub const IPAD_PRO_12_9_5TH_RESOLUTION: &str = "2048x2732";
pub const IPAD_PRO_11_4TH_RESOLUTION: &str = "1668x2388";
pub const IPAD_PRO_11_3RD_RESOLUTION: &str = "1668x2388";
pub const IPAD_AIR_5TH_RESOLUTION: &str = "1640x2360";
pub const IPAD_10TH_RESOLUTION: &str = "1640x2360";
pub const IPAD_MINI_6TH_RESOLUTION: &str = "1488x2266";
pub const IPAD_9TH_RESOLUTION: &str = "1620x2160";
pub const IPAD_8TH_RESOLUTION: &str = "1620x2160";
pub const IPAD_7TH_RESOLUTION: &str = "1620x2160";

// Common resolutions for fallback
pub const DEFAULT_IPHONE_RESOLUTION: &str = "1170x2532";
pub const DEFAULT_IPAD_RESOLUTION: &str = "1620x2160";

// Simplified resolution constants for common device types
pub const IPHONE_SE_RESOLUTION: &str = "750x1334";
pub const IPAD_PRO_12_9_RESOLUTION: &str = "2048x2732";
pub const IPAD_PRO_11_RESOLUTION: &str = "1668x2388";
pub const IPAD_AIR_13_RESOLUTION: &str = "2064x2752";
pub const IPAD_AIR_RESOLUTION: &str = "1640x2360";
pub const IPAD_MINI_RESOLUTION: &str = "1488x2266";
pub const IPAD_RESOLUTION: &str = "1620x2160";

// Display DPI
pub const RETINA_DISPLAY: &str = "Retina";
