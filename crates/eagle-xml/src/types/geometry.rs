use super::ERot;

/// `<wire>`: straight line, or an arc when `curve` is set
#[derive(Debug, Clone, PartialEq)]
pub struct EWire {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub layer: i32,
    /// Signed sweep in degrees, positive counter-clockwise
    pub curve: Option<f64>,
}

impl EWire {
    pub fn is_curved(&self) -> bool {
        self.curve.is_some_and(|c| c != 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EJunction {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ECircle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub width: f64,
    pub layer: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ERect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub layer: i32,
    pub rot: Option<ERot>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EVertex {
    pub x: f64,
    pub y: f64,
    pub curve: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EPolygon {
    pub width: f64,
    pub layer: i32,
    pub vertices: Vec<EVertex>,
}
