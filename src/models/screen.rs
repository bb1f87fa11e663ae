//! Screen geometry and input types shared by every substrate's agent
//! client: UI element trees, tap/gesture actions, and window size.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in device screen points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Elements with non-positive dimensions or negative origin are
    /// filtered out everywhere except the always-emitted kinds.
    pub fn is_well_formed(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.x >= 0.0 && self.y >= 0.0
    }

    /// Parses the Android `uiautomator`-style bounds string
    /// `"[x1,y1][x2,y2]"` into a rect; malformed input yields a zero rect
    /// rather than an error, per the bounds-parsing testable property.
    pub fn parse_bounds(bounds: &str) -> Self {
        let digits_and_commas = |s: &str| -> Option<(f64, f64)> {
            let mut parts = s.split(',');
            let a = parts.next()?.trim().parse().ok()?;
            let b = parts.next()?.trim().parse().ok()?;
            Some((a, b))
        };

        let cleaned = bounds.trim();
        let inner: Vec<&str> = cleaned
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split("][")
            .collect();
        if inner.len() != 2 {
            return Self::zero();
        }
        let (Some((x1, y1)), Some((x2, y2))) =
            (digits_and_commas(inner[0]), digits_and_commas(inner[1]))
        else {
            return Self::zero();
        };
        if x2 < x1 || y2 < y1 {
            return Self::zero();
        }
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

/// Normalized UI element kind. Substrate-specific accessibility classes are
/// mapped onto this fixed vocabulary by the agent client's element filter;
/// anything unrecognized keeps its native class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenElementType {
    Button,
    TextField,
    Switch,
    SearchField,
    StaticText,
    Icon,
    Image,
    Other(String),
}

impl ScreenElementType {
    /// Kinds that are always emitted when visible, even without a label or
    /// identifier — needed so automated tests can always find interactive
    /// controls.
    pub fn always_include(&self) -> bool {
        matches!(
            self,
            Self::Button | Self::TextField | Self::Switch | Self::SearchField
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenElement {
    #[serde(rename = "type")]
    pub element_type: ScreenElementType,
    pub label: Option<String>,
    pub name: Option<String>,
    pub value: Option<String>,
    pub identifier: Option<String>,
    pub text: Option<String>,
    pub focused: Option<bool>,
    pub rect: Rect,
}

impl ScreenElement {
    /// True iff this element should survive the uniform post-fetch filter:
    /// visible (enabled, non-negative origin) and either labeled/identified
    /// or of an always-included kind.
    pub fn should_emit(&self, enabled: bool) -> bool {
        let visible = enabled && self.rect.x >= 0.0 && self.rect.y >= 0.0;
        if !visible {
            return false;
        }
        if !self.rect.is_well_formed() && !self.element_type.always_include() {
            return false;
        }
        let has_label = self.label.is_some() || self.identifier.is_some();
        has_label || self.element_type.always_include()
    }
}

/// A single step of a tap/gesture sequence. The two vocabularies
/// (`press/move/release` and `pointer*`) are equivalent; `GestureAction`
/// models both so a translation layer (see `agent::gesture`) can convert
/// between them without information loss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TapActionKind {
    Press,
    Move,
    Release,
    Pause,
    PointerDown,
    PointerUp,
    PointerMove,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TapAction {
    #[serde(rename = "type")]
    pub kind: TapActionKind,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub duration_ms: Option<u64>,
    pub button: Option<u32>,
}

impl TapAction {
    pub fn new(kind: TapActionKind) -> Self {
        Self {
            kind,
            x: None,
            y: None,
            duration_ms: None,
            button: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bounds_valid() {
        let rect = Rect::parse_bounds("[100,200][500,600]");
        assert_eq!(rect.x, 100.0);
        assert_eq!(rect.y, 200.0);
        assert_eq!(rect.width, 400.0);
        assert_eq!(rect.height, 400.0);
    }

    #[test]
    fn parse_bounds_invalid_is_zero_rect() {
        let rect = Rect::parse_bounds("invalid");
        assert_eq!(rect, Rect::zero());
    }

    #[test]
    fn always_include_kinds_emit_without_label() {
        let element = ScreenElement {
            element_type: ScreenElementType::Button,
            label: None,
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
        assert!(element.should_emit(true));
    }

    #[test]
    fn disabled_or_negative_origin_never_emitted() {
        let mut element = ScreenElement {
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
        assert!(!element.should_emit(false));
        element.rect.x = -1.0;
        assert!(!element.should_emit(true));
    }
}
