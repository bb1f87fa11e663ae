//! Input validation for capability parameters.
//!
//! Kept small and deliberately separate from `command/mod.rs`'s parameter
//! DTOs: these checks run before a command is ever dispatched to a device
//! substrate, and fail fast with a message the caller can surface directly.

#[derive(Debug, Clone, Copy)]
pub enum DevicePlatform {
    Android,
    Ios,
}

/// Validates a tap/swipe coordinate pair against a (non-negative) precondition.
///
/// Negative coordinates are rejected before any command is dispatched to a
/// substrate tool, rather than relying on the tool to reject them itself.
pub fn validate_coordinates(x: f64, y: f64) -> Result<(), String> {
    if x < 0.0 || y < 0.0 {
        return Err(format!("coordinates must be non-negative, got ({x}, {y})"));
    }
    Ok(())
}

/// Validates a URL for the `openUrl` capability. Only schemes a device
/// substrate can actually hand off to an app are accepted.
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("url must not be empty".to_string());
    }
    match url.split_once("://") {
        Some((scheme, rest)) if !scheme.is_empty() && !rest.is_empty() => Ok(()),
        _ => Err(format!("not a valid URL: {url}")),
    }
}

/// `sendKeys` is a no-op on empty text, and Android's companion-app text
/// injection additionally requires the text to be pure ASCII.
pub fn validate_send_keys(text: &str, platform: DevicePlatform) -> Result<(), String> {
    if text.is_empty() {
        return Ok(());
    }
    if matches!(platform, DevicePlatform::Android) && !text.is_ascii() {
        return Err("non-ASCII text requires the companion keyboard app".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(10.0, 20.0).is_ok());
        assert!(validate_coordinates(-1.0, 20.0).is_err());
        assert!(validate_coordinates(10.0, -1.0).is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("myapp://open").is_ok());
        assert!(validate_url("").is_err());
        assert!(validate_url("not-a-url").is_err());
    }

    #[test]
    fn test_validate_send_keys() {
        assert!(validate_send_keys("", DevicePlatform::Android).is_ok());
        assert!(validate_send_keys("hello", DevicePlatform::Android).is_ok());
        assert!(validate_send_keys("héllo", DevicePlatform::Android).is_err());
        assert!(validate_send_keys("héllo", DevicePlatform::Ios).is_ok());
    }
}
