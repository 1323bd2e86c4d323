use serde::{Deserialize, Serialize};

use crate::position::{BoundingBox, Point};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HJustify {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VJustify {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Size, style and anchoring of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextEffects {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub hjustify: HJustify,
    #[serde(default)]
    pub vjustify: VJustify,
    /// Degrees, counter-clockwise
    #[serde(default)]
    pub angle: f64,
    #[serde(default = "visible_default")]
    pub visible: bool,
}

fn visible_default() -> bool {
    true
}

impl Default for TextEffects {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            bold: false,
            hjustify: HJustify::Center,
            vjustify: VJustify::Center,
            angle: 0.0,
            visible: true,
        }
    }
}

impl TextEffects {
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn is_vertical(&self) -> bool {
        let quarter = (self.angle / 90.0).round() as i64;
        quarter.rem_euclid(2) == 1
    }
}

/// Approximate extent of `text` anchored at `position`.
///
/// Glyphs are taken as `width` wide, so the box is only as good as a
/// fixed-pitch estimate.
pub fn text_box(text: &str, position: Point, effects: &TextEffects) -> BoundingBox {
    let len = text.chars().count().max(1) as i32 * effects.width;
    let h = effects.height;

    let along = match effects.hjustify {
        HJustify::Left => (0, len),
        HJustify::Center => (-len / 2, len - len / 2),
        HJustify::Right => (-len, 0),
    };
    let across = match effects.vjustify {
        VJustify::Top => (0, h),
        VJustify::Center => (-h / 2, h - h / 2),
        VJustify::Bottom => (-h, 0),
    };

    let (a, b) = if effects.is_vertical() {
        // Vertical text reads upward; its top faces -X.
        (
            Point::new(position.x + across.0, position.y - along.1),
            Point::new(position.x + across.1, position.y - along.0),
        )
    } else {
        (
            Point::new(position.x + along.0, position.y + across.0),
            Point::new(position.x + along.1, position.y + across.1),
        )
    };

    BoundingBox::from_corners(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_box_horizontal() {
        let effects = TextEffects {
            hjustify: HJustify::Left,
            vjustify: VJustify::Bottom,
            ..TextEffects::with_size(50, 60)
        };
        let bbox = text_box("ABCD", Point::new(100, 100), &effects);
        assert_eq!(bbox.min, Point::new(100, 40));
        assert_eq!(bbox.max, Point::new(300, 100));
    }

    #[test]
    fn test_text_box_vertical() {
        let effects = TextEffects {
            hjustify: HJustify::Left,
            vjustify: VJustify::Bottom,
            angle: 90.0,
            ..TextEffects::with_size(50, 60)
        };
        let bbox = text_box("AB", Point::new(0, 0), &effects);
        assert_eq!(bbox.min, Point::new(-60, -100));
        assert_eq!(bbox.max, Point::new(0, 0));
    }

    #[test]
    fn test_vertical_detection() {
        let mut effects = TextEffects::default();
        assert!(!effects.is_vertical());
        effects.angle = 270.0;
        assert!(effects.is_vertical());
        effects.angle = 180.0;
        assert!(!effects.is_vertical());
    }
}
