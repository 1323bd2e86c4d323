use super::ERot;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinLength {
    Point,
    Short,
    Middle,
    #[default]
    Long,
}

impl FromStr for PinLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "point" => Ok(PinLength::Point),
            "short" => Ok(PinLength::Short),
            "middle" => Ok(PinLength::Middle),
            "long" => Ok(PinLength::Long),
            _ => Err(format!("Unknown pin length: {}", s)),
        }
    }
}

/// Which of a pin's name and pad number are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinVisible {
    Off,
    Pad,
    Pin,
    #[default]
    Both,
}

impl FromStr for PinVisible {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(PinVisible::Off),
            "pad" => Ok(PinVisible::Pad),
            "pin" => Ok(PinVisible::Pin),
            "both" => Ok(PinVisible::Both),
            _ => Err(format!("Unknown pin visibility: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDirection {
    Nc,
    In,
    Out,
    Io,
    Oc,
    Pwr,
    Pas,
    Hiz,
    Sup,
}

impl FromStr for PinDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nc" => Ok(PinDirection::Nc),
            "in" => Ok(PinDirection::In),
            "out" => Ok(PinDirection::Out),
            "io" => Ok(PinDirection::Io),
            "oc" => Ok(PinDirection::Oc),
            "pwr" => Ok(PinDirection::Pwr),
            "pas" => Ok(PinDirection::Pas),
            "hiz" => Ok(PinDirection::Hiz),
            "sup" => Ok(PinDirection::Sup),
            _ => Err(format!("Unknown pin direction: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinFunction {
    None,
    Dot,
    Clk,
    DotClk,
}

impl FromStr for PinFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(PinFunction::None),
            "dot" => Ok(PinFunction::Dot),
            "clk" => Ok(PinFunction::Clk),
            "dotclk" => Ok(PinFunction::DotClk),
            _ => Err(format!("Unknown pin function: {}", s)),
        }
    }
}

/// `<pin>` inside a `<symbol>`
#[derive(Debug, Clone, PartialEq)]
pub struct EPin {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub visible: PinVisible,
    pub length: PinLength,
    pub direction: Option<PinDirection>,
    pub function: Option<PinFunction>,
    pub swaplevel: i32,
    pub rot: ERot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EDeviceSet {
    pub name: String,
    pub prefix: Option<String>,
    pub uservalue: bool,
}

/// `<connect>`: maps a gate pin onto one or more package pads
#[derive(Debug, Clone, PartialEq)]
pub struct EConnect {
    pub gate: String,
    pub pin: String,
    /// Whitespace separated pad names
    pub pad: String,
}

impl EConnect {
    pub fn pads(&self) -> impl Iterator<Item = &str> {
        self.pad.split_whitespace()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EDevice {
    pub name: String,
    pub package: Option<String>,
    pub connects: Vec<EConnect>,
}

impl EDevice {
    pub fn connect_for(&self, gate: &str, pin: &str) -> Option<&EConnect> {
        self.connects
            .iter()
            .find(|c| c.gate == gate && c.pin == pin)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EGate {
    pub name: String,
    pub symbol: String,
    pub x: f64,
    pub y: f64,
    pub addlevel: Option<String>,
    pub swaplevel: Option<i32>,
}
