use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::position::{BoundingBox, Point};
use crate::text::{TextEffects, text_box};

/// Mandatory fields every part and placed component carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldId {
    Reference,
    Value,
    Footprint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub text: String,
    pub position: Point,
    pub effects: TextEffects,
}

impl Field {
    pub fn new(id: FieldId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            position: Point::default(),
            effects: TextEffects::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    #[default]
    None,
    Filled,
    Background,
}

/// Direction the pin body extends from its connection point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinOrientation {
    #[default]
    Right,
    Up,
    Left,
    Down,
}

impl PinOrientation {
    pub fn unit_vector(self) -> Point {
        match self {
            PinOrientation::Right => Point::new(1, 0),
            PinOrientation::Up => Point::new(0, -1),
            PinOrientation::Left => Point::new(-1, 0),
            PinOrientation::Down => Point::new(0, 1),
        }
    }
}

/// Electrical type of a pin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinType {
    Input,
    Output,
    Bidirectional,
    TriState,
    Passive,
    #[default]
    Unspecified,
    PowerIn,
    PowerOut,
    OpenCollector,
    OpenEmitter,
    NoConnect,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinShape {
    #[default]
    Line,
    Inverted,
    Clock,
    InvertedClock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub name: String,
    pub number: String,
    pub position: Point,
    pub orientation: PinOrientation,
    pub length: i32,
    pub pin_type: PinType,
    pub shape: PinShape,
    pub name_visible: bool,
    pub number_visible: bool,
}

impl Pin {
    /// Far end of the pin body.
    pub fn end(&self) -> Point {
        let v = self.orientation.unit_vector();
        self.position + Point::new(v.x * self.length, v.y * self.length)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Circle {
        center: Point,
        radius: i32,
        width: i32,
    },
    Rectangle {
        start: Point,
        end: Point,
        width: i32,
        fill: FillMode,
    },
    Polyline {
        points: Vec<Point>,
        width: i32,
        fill: FillMode,
    },
    Arc {
        center: Point,
        radius: i32,
        start: Point,
        end: Point,
        width: i32,
        fill: FillMode,
    },
    Text {
        text: String,
        position: Point,
        effects: TextEffects,
    },
    Pin(Pin),
}

impl Shape {
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        match self {
            Shape::Circle { center, radius, .. } | Shape::Arc { center, radius, .. } => {
                Some(BoundingBox::from_point(*center).inflate(*radius))
            }
            Shape::Rectangle { start, end, .. } => Some(BoundingBox::from_corners(*start, *end)),
            Shape::Polyline { points, .. } => BoundingBox::from_points(points.iter().copied()),
            Shape::Text {
                text,
                position,
                effects,
            } => Some(text_box(text, *position, effects)),
            Shape::Pin(pin) => Some(BoundingBox::from_corners(pin.position, pin.end())),
        }
    }
}

/// A drawing primitive belonging to one unit of a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibItem {
    pub unit: u32,
    pub shape: Shape,
}

/// A library part, possibly split into several units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibPart {
    pub name: String,
    pub unit_count: u32,
    pub power: bool,
    pub fields: Vec<Field>,
    pub items: Vec<LibItem>,
}

impl LibPart {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit_count: 1,
            power: false,
            fields: vec![
                Field::new(FieldId::Reference, "U"),
                Field::new(FieldId::Value, ""),
                Field::new(FieldId::Footprint, ""),
            ],
            items: Vec::new(),
        }
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut Field {
        if let Some(index) = self.fields.iter().position(|f| f.id == id) {
            &mut self.fields[index]
        } else {
            self.fields.push(Field::new(id, ""));
            let last = self.fields.len() - 1;
            &mut self.fields[last]
        }
    }

    pub fn add(&mut self, unit: u32, shape: Shape) {
        self.items.push(LibItem { unit, shape });
    }

    /// Items drawn for `unit`; unit 0 items are shared by all units.
    pub fn unit_items(&self, unit: u32) -> impl Iterator<Item = &LibItem> {
        self.items
            .iter()
            .filter(move |item| item.unit == 0 || item.unit == unit)
    }

    pub fn pins(&self) -> impl Iterator<Item = (u32, &Pin)> {
        self.items.iter().filter_map(|item| match &item.shape {
            Shape::Pin(pin) => Some((item.unit, pin)),
            _ => None,
        })
    }

    pub fn body_bounding_box(&self, unit: u32) -> Option<BoundingBox> {
        let mut result: Option<BoundingBox> = None;
        for bbox in self.unit_items(unit).filter_map(|i| i.shape.bounding_box()) {
            match result.as_mut() {
                Some(r) => r.merge(&bbox),
                None => result = Some(bbox),
            }
        }
        result
    }
}

/// Parts keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartLibrary {
    pub name: String,
    pub parts: BTreeMap<String, LibPart>,
}

impl PartLibrary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: BTreeMap::new(),
        }
    }

    /// Add a part, returning the one it replaced.
    pub fn insert(&mut self, part: LibPart) -> Option<LibPart> {
        let previous = self.parts.insert(part.name.clone(), part);
        if let Some(p) = &previous {
            log::debug!("Replacing library part {}", p.name);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&LibPart> {
        self.parts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
