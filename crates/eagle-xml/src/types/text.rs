use super::ERot;
use std::str::FromStr;

/// Text anchor alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    Center,
    CenterLeft,
    TopCenter,
    TopLeft,
    TopRight,
    CenterRight,
    BottomCenter,
    #[default]
    BottomLeft,
    BottomRight,
}

impl Align {
    /// Alignment after turning the text by 180 degrees.
    pub fn opposite(self) -> Self {
        match self {
            Align::Center => Align::Center,
            Align::CenterLeft => Align::CenterRight,
            Align::CenterRight => Align::CenterLeft,
            Align::TopCenter => Align::BottomCenter,
            Align::BottomCenter => Align::TopCenter,
            Align::TopLeft => Align::BottomRight,
            Align::BottomRight => Align::TopLeft,
            Align::TopRight => Align::BottomLeft,
            Align::BottomLeft => Align::TopRight,
        }
    }
}

impl FromStr for Align {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "center" => Ok(Align::Center),
            "center-left" => Ok(Align::CenterLeft),
            "top-center" => Ok(Align::TopCenter),
            "top-left" => Ok(Align::TopLeft),
            "top-right" => Ok(Align::TopRight),
            "center-right" => Ok(Align::CenterRight),
            "bottom-center" => Ok(Align::BottomCenter),
            "bottom-left" => Ok(Align::BottomLeft),
            "bottom-right" => Ok(Align::BottomRight),
            _ => Err(format!("Unknown align: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFont {
    Vector,
    Proportional,
    Fixed,
}

impl FromStr for TextFont {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vector" => Ok(TextFont::Vector),
            "proportional" => Ok(TextFont::Proportional),
            "fixed" => Ok(TextFont::Fixed),
            _ => Err(format!("Unknown font: {}", s)),
        }
    }
}

/// Which parts of an attribute are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttrDisplay {
    Off,
    #[default]
    Value,
    Name,
    Both,
}

impl FromStr for AttrDisplay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(AttrDisplay::Off),
            "value" => Ok(AttrDisplay::Value),
            "name" => Ok(AttrDisplay::Name),
            "both" => Ok(AttrDisplay::Both),
            _ => Err(format!("Unknown display: {}", s)),
        }
    }
}

/// `<text>`: free text, in a symbol or on a sheet's plain layer
#[derive(Debug, Clone, PartialEq)]
pub struct EText {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub layer: Option<i32>,
    /// `None` when the file leaves the font unspecified
    pub font: Option<TextFont>,
    pub ratio: f64,
    pub rot: ERot,
    pub align: Align,
}

/// `<label>`: net or bus name placed on a segment
#[derive(Debug, Clone, PartialEq)]
pub struct ELabel {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub layer: i32,
    pub font: TextFont,
    pub ratio: f64,
    pub rot: ERot,
    pub xref: bool,
}

/// `<attribute>`: a named value on a part or instance, optionally placed
#[derive(Debug, Clone, PartialEq)]
pub struct EAttr {
    pub name: String,
    pub value: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub size: Option<f64>,
    pub layer: Option<i32>,
    pub font: Option<TextFont>,
    pub ratio: Option<f64>,
    pub rot: Option<ERot>,
    pub align: Option<Align>,
    pub display: AttrDisplay,
    pub constant: bool,
}

impl EAttr {
    /// Position of a placed attribute. Both coordinates must be present.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.x?, self.y?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        let all = [
            Align::Center,
            Align::CenterLeft,
            Align::TopCenter,
            Align::TopLeft,
            Align::TopRight,
            Align::CenterRight,
            Align::BottomCenter,
            Align::BottomLeft,
            Align::BottomRight,
        ];
        for align in all {
            assert_eq!(align.opposite().opposite(), align);
        }
        assert_eq!(Align::BottomLeft.opposite(), Align::TopRight);
        assert_eq!(Align::Center.opposite(), Align::Center);
    }

    #[test]
    fn parse_align_keywords() {
        assert_eq!("top-left".parse::<Align>().unwrap(), Align::TopLeft);
        assert_eq!("center".parse::<Align>().unwrap(), Align::Center);
        assert!("middle".parse::<Align>().is_err());
    }

    #[test]
    fn attr_position_requires_both_coordinates() {
        let mut attr = EAttr {
            name: "NAME".into(),
            value: None,
            x: Some(1.0),
            y: None,
            size: None,
            layer: None,
            font: None,
            ratio: None,
            rot: None,
            align: None,
            display: AttrDisplay::default(),
            constant: false,
        };
        assert_eq!(attr.position(), None);
        attr.y = Some(2.0);
        assert_eq!(attr.position(), Some((1.0, 2.0)));
    }
}
