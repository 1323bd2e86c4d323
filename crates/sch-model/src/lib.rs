//! In-memory schematic document model.
//!
//! A [`Schematic`] owns a root [`Screen`] and the [`PartLibrary`] its
//! components are drawn from. A screen is a page plus an ordered list of
//! [`SchItem`]s; hierarchical designs place child [`Sheet`]s on the root
//! screen, each owning its own screen.
//!
//! All coordinates are integer mils with Y growing downward. The structures
//! are serialisable using `serde` so they can be dumped as JSON.

pub mod items;
pub mod part;
pub mod position;
pub mod text;

use serde::{Deserialize, Serialize};

pub use items::*;
pub use part::*;
pub use position::{BoundingBox, Orientation, Point, midpoint, segment_hit, transform};
pub use text::{HJustify, TextEffects, VJustify, text_box};

/// Hierarchical path of the root sheet.
pub const ROOT_SHEET_PATH: &str = "/";

/// Page size in mils.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub width: i32,
    pub height: i32,
}

impl PageInfo {
    /// ISO A4, landscape.
    pub const A4: PageInfo = PageInfo {
        width: 11693,
        height: 8268,
    };

    pub fn centre(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::A4
    }
}

/// The drawing content of one sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub file_name: String,
    pub page: PageInfo,
    pub items: Vec<SchItem>,
}

impl Screen {
    pub fn new(file_name: impl Into<String>, page: PageInfo) -> Self {
        Self {
            file_name: file_name.into(),
            page,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: SchItem) {
        self.items.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Union of all item boxes, `None` for an empty screen.
    pub fn bounding_box(&self, library: &PartLibrary) -> Option<BoundingBox> {
        let mut result: Option<BoundingBox> = None;
        for item in &self.items {
            let bbox = item.bounding_box(library);
            match result.as_mut() {
                Some(r) => r.merge(&bbox),
                None => result = Some(bbox),
            }
        }
        result
    }

    pub fn translate(&mut self, delta: Point) {
        for item in &mut self.items {
            item.translate(delta);
        }
    }

    pub fn lines(&self, layer: LineLayer) -> impl Iterator<Item = &Line> {
        self.items.iter().filter_map(move |item| match item {
            SchItem::Line(line) if line.layer == layer => Some(line),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.items.iter().filter_map(|item| match item {
            SchItem::Label(label) => Some(label),
            _ => None,
        })
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.items.iter().filter_map(|item| match item {
            SchItem::Component(c) => Some(c),
            _ => None,
        })
    }

    pub fn bus_entries(&self) -> impl Iterator<Item = &BusEntry> {
        self.items.iter().filter_map(|item| match item {
            SchItem::BusEntry(e) => Some(e),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.items.iter().filter_map(|item| match item {
            SchItem::Marker(m) => Some(m),
            _ => None,
        })
    }

    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.items.iter().filter_map(|item| match item {
            SchItem::Sheet(s) => Some(s.as_ref()),
            _ => None,
        })
    }
}

/// A child sheet symbol and the screen it refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub file_name: String,
    pub position: Point,
    pub size: Point,
    /// Identity stamp, unique within one import
    pub stamp: u32,
    pub screen: Screen,
}

impl Sheet {
    /// Default symbol size on the parent page.
    pub const DEFAULT_SIZE: Point = Point::new(500, 150);

    pub fn path(&self) -> String {
        sheet_path(self.stamp)
    }
}

pub fn sheet_path(stamp: u32) -> String {
    format!("/{stamp:08X}/")
}

/// A complete imported document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schematic {
    pub root: Screen,
    pub library: PartLibrary,
}

impl Schematic {
    /// Every screen in the document, root first.
    pub fn screens(&self) -> Vec<&Screen> {
        let mut screens = vec![&self.root];
        screens.extend(self.root.sheets().map(|s| &s.screen));
        screens
    }
}
