use super::{EAttr, ERot};

/// `<part>`: a schematic-wide part declaration
#[derive(Debug, Clone, PartialEq)]
pub struct EPart {
    pub name: String,
    pub library: String,
    pub deviceset: String,
    pub device: String,
    pub technology: String,
    pub value: Option<String>,
}

/// `<instance>`: placement of one gate of a part on a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct EInstance {
    pub part: String,
    pub gate: String,
    pub x: f64,
    pub y: f64,
    pub smashed: bool,
    pub rot: Option<ERot>,
    pub attributes: Vec<EAttr>,
}

impl EInstance {
    /// Attribute override by exact name. A later `<attribute>` replaces an
    /// earlier one with the same name.
    pub fn attribute(&self, name: &str) -> Option<&EAttr> {
        self.attributes.iter().rev().find(|a| a.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EPinRef {
    pub part: String,
    pub gate: String,
    pub pin: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ELayer {
    pub number: i32,
    pub name: String,
    pub color: i32,
    pub fill: i32,
    pub visible: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ENet {
    pub name: String,
    pub class: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EBus {
    pub name: String,
}
