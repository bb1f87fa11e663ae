//! Maps each agent's native accessibility element class names onto the
//! shared [`ScreenElementType`] vocabulary, then applies the uniform
//! post-fetch visibility filter.

use crate::models::screen::{ScreenElement, ScreenElementType};

/// Maps an XCUITest (`XCUIElementType*`) or DeviceKit accessibility class
/// name to the shared element vocabulary. Unrecognized classes keep their
/// native name so callers can still see what they're dealing with.
pub fn map_element_type(native_class: &str) -> ScreenElementType {
    match native_class {
        "XCUIElementTypeButton" | "android.widget.Button" | "android.widget.ImageButton" => {
            ScreenElementType::Button
        }
        "XCUIElementTypeTextField" | "XCUIElementTypeSecureTextField" | "android.widget.EditText" => {
            ScreenElementType::TextField
        }
        "XCUIElementTypeSwitch" | "android.widget.Switch" | "android.widget.ToggleButton" => {
            ScreenElementType::Switch
        }
        "XCUIElementTypeSearchField" => ScreenElementType::SearchField,
        "XCUIElementTypeStaticText" | "android.widget.TextView" => ScreenElementType::StaticText,
        "XCUIElementTypeIcon" => ScreenElementType::Icon,
        "XCUIElementTypeImage" | "android.widget.ImageView" => ScreenElementType::Image,
        other => ScreenElementType::Other(other.to_string()),
    }
}

/// Applies the uniform post-fetch filter to a raw element list, keeping
/// only elements whose `should_emit` holds for the current enabled state.
pub fn filter_visible(elements: Vec<(ScreenElement, bool)>) -> Vec<ScreenElement> {
    elements
        .into_iter()
        .filter(|(element, enabled)| element.should_emit(*enabled))
        .map(|(element, _)| element)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::screen::Rect;

    #[test]
    fn maps_known_ios_and_android_classes() {
        assert_eq!(map_element_type("XCUIElementTypeButton"), ScreenElementType::Button);
        assert_eq!(
            map_element_type("android.widget.EditText"),
            ScreenElementType::TextField
        );
    }

    #[test]
    fn unknown_class_is_kept_verbatim() {
        assert_eq!(
            map_element_type("com.example.CustomView"),
            ScreenElementType::Other("com.example.CustomView".to_string())
        );
    }

    #[test]
    fn filter_visible_drops_disabled_and_unlabeled() {
        let labeled = ScreenElement {
            element_type: ScreenElementType::StaticText,
            label: Some("hi".into()),
            name: None,
            value: None,
            identifier: None,
            text: None,
            focused: None,
            rect: Rect {
                x: 1.0,
                y: 1.0,
                width: 10.0,
                height: 10.0,
            },
        };
        let unlabeled = ScreenElement {
            label: None,
            identifier: None,
            ..labeled.clone()
        };
        let filtered = filter_visible(vec![(labeled, true), (unlabeled, true)]);
        assert_eq!(filtered.len(), 1);
    }
}
