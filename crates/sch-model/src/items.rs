use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Sheet;
use crate::part::{Field, FieldId, PartLibrary};
use crate::position::{BoundingBox, Orientation, Point, transform};
use crate::text::{TextEffects, text_box};

/// Length of each leg of a bus entry glyph.
pub const BUS_ENTRY_SIZE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineLayer {
    Wire,
    Bus,
    Notes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub layer: LineLayer,
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(layer: LineLayer, start: Point, end: Point) -> Self {
        Self { layer, start, end }
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y && self.start.x != self.end.x
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x && self.start.y != self.end.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Junction {
    pub position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    Local,
    Global,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub kind: LabelKind,
    pub text: String,
    pub position: Point,
    /// Quarter turns counter-clockwise, 0..=3
    pub spin: u8,
    pub effects: TextEffects,
}

impl Label {
    fn bounding_box(&self) -> BoundingBox {
        let len = self.text.chars().count().max(1) as i32 * self.effects.width;
        let h = self.effects.height;
        let p = self.position;
        let (a, b) = match self.spin % 4 {
            0 => (Point::new(p.x, p.y - h), Point::new(p.x + len, p.y)),
            1 => (Point::new(p.x - h, p.y - len), p),
            2 => (Point::new(p.x - len, p.y - h), p),
            _ => (Point::new(p.x - h, p.y), Point::new(p.x, p.y + len)),
        };
        BoundingBox::from_corners(a, b)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    pub position: Point,
    pub effects: TextEffects,
}

/// One row of a component's per-sheet instance table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetReference {
    pub path: String,
    pub reference: String,
    pub unit: u32,
}

/// A placed unit of a library part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub part: String,
    pub unit: u32,
    pub position: Point,
    pub orientation: Orientation,
    pub mirror: bool,
    pub uuid: Uuid,
    /// Field positions are absolute sheet coordinates.
    pub fields: Vec<Field>,
    pub references: Vec<SheetReference>,
}

impl Component {
    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn reference(&self) -> &str {
        self.field(FieldId::Reference)
            .map(|f| f.text.as_str())
            .unwrap_or_default()
    }

    fn bounding_box(&self, library: &PartLibrary) -> BoundingBox {
        let Some(body) = library
            .get(&self.part)
            .and_then(|part| part.body_bounding_box(self.unit))
        else {
            return BoundingBox::from_point(self.position);
        };

        let corners = [
            body.min,
            body.max,
            Point::new(body.min.x, body.max.y),
            Point::new(body.max.x, body.min.y),
        ];
        let placed = corners
            .into_iter()
            .map(|c| transform(c, self.orientation, self.mirror) + self.position);
        BoundingBox::from_points(placed).unwrap_or_else(|| BoundingBox::from_point(self.position))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusEntryGlyph {
    /// `/`: rises from left to right
    Slash,
    /// `\`: falls from left to right
    Backslash,
}

/// Diagonal wire-to-bus connector, anchored at its left end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusEntry {
    pub position: Point,
    pub glyph: BusEntryGlyph,
}

impl BusEntry {
    /// Entry spanning two points. The left point becomes the anchor.
    pub fn between(a: Point, b: Point) -> Self {
        let (left, right) = if a.x <= b.x { (a, b) } else { (b, a) };
        let glyph = if right.y < left.y {
            BusEntryGlyph::Slash
        } else {
            BusEntryGlyph::Backslash
        };
        Self {
            position: left,
            glyph,
        }
    }

    pub fn end(&self) -> Point {
        let dy = match self.glyph {
            BusEntryGlyph::Slash => -BUS_ENTRY_SIZE,
            BusEntryGlyph::Backslash => BUS_ENTRY_SIZE,
        };
        self.position + Point::new(BUS_ENTRY_SIZE, dy)
    }
}

/// A note left on the sheet for the user to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Point,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchItem {
    Line(Line),
    Junction(Junction),
    Label(Label),
    Text(Text),
    Component(Component),
    BusEntry(BusEntry),
    Marker(Marker),
    Sheet(Box<Sheet>),
}

impl SchItem {
    /// Short, stable name of the item kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchItem::Line(line) => match line.layer {
                LineLayer::Wire => "wire",
                LineLayer::Bus => "bus",
                LineLayer::Notes => "notes line",
            },
            SchItem::Junction(_) => "junction",
            SchItem::Label(label) => match label.kind {
                LabelKind::Local => "label",
                LabelKind::Global => "global label",
            },
            SchItem::Text(_) => "text",
            SchItem::Component(_) => "component",
            SchItem::BusEntry(_) => "bus entry",
            SchItem::Marker(_) => "marker",
            SchItem::Sheet(_) => "sheet",
        }
    }

    pub fn bounding_box(&self, library: &PartLibrary) -> BoundingBox {
        match self {
            SchItem::Line(line) => BoundingBox::from_corners(line.start, line.end),
            SchItem::Junction(j) => BoundingBox::from_point(j.position).inflate(25),
            SchItem::Label(label) => label.bounding_box(),
            SchItem::Text(text) => text_box(&text.text, text.position, &text.effects),
            SchItem::Component(component) => component.bounding_box(library),
            SchItem::BusEntry(entry) => BoundingBox::from_corners(entry.position, entry.end()),
            SchItem::Marker(marker) => BoundingBox::from_point(marker.position),
            SchItem::Sheet(sheet) => {
                BoundingBox::from_corners(sheet.position, sheet.position + sheet.size)
            }
        }
    }

    pub fn translate(&mut self, delta: Point) {
        match self {
            SchItem::Line(line) => {
                line.start += delta;
                line.end += delta;
            }
            SchItem::Junction(j) => j.position += delta,
            SchItem::Label(label) => label.position += delta,
            SchItem::Text(text) => text.position += delta,
            SchItem::Component(component) => {
                component.position += delta;
                for field in &mut component.fields {
                    field.position += delta;
                }
            }
            SchItem::BusEntry(entry) => entry.position += delta,
            SchItem::Marker(marker) => marker.position += delta,
            SchItem::Sheet(sheet) => sheet.position += delta,
        }
    }
}
