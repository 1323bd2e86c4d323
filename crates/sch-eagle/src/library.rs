//! Conversion of EAGLE libraries into native multi-unit parts.
//!
//! Every `deviceset` x `device` pair becomes one [`LibPart`]. The device set's
//! gates become the part's units in document order, each drawing its symbol.

use std::collections::HashMap;

use eagle_xml::{
    ECircle, EDevice, EDeviceSet, EGate, EPin, EPolygon, ERect, EText, EWire, EagleError,
    ElementKind, PinDirection, PinFunction, PinLength, PinVisible, Record, elements,
    elements_named, map_children,
};
use roxmltree::Node;
use sch_model::{
    FieldId, FillMode, LibPart, Pin, PinOrientation, PinShape, PinType, Point, Shape,
};

use crate::error::{ImportError, Result};
use crate::nets::escape_name;
use crate::session::ImportSession;
use crate::text::{text_effects, whole_degrees};
use crate::units::{arc_centre, to_native_length, to_native_point, EAGLE_TO_NATIVE};

/// Identifies one gate of one device variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GateKey {
    pub deviceset: String,
    pub device: String,
    pub gate: String,
}

impl GateKey {
    pub fn new(deviceset: &str, device: &str, gate: &str) -> Self {
        Self {
            deviceset: deviceset.to_string(),
            device: device.to_string(),
            gate: gate.to_string(),
        }
    }
}

/// What one foreign library contributed to the import.
#[derive(Debug, Clone, Default)]
pub struct EagleLibrary {
    pub name: String,
    /// (deviceset, device) to native part name
    pub part_names: HashMap<(String, String), String>,
    /// Native part name to package name
    pub packages: HashMap<String, String>,
    pub gate_units: HashMap<GateKey, u32>,
}

impl EagleLibrary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn part_name(&self, deviceset: &str, device: &str) -> Option<&str> {
        self.part_names
            .get(&(deviceset.to_string(), device.to_string()))
            .map(String::as_str)
    }

    pub fn gate_unit(&self, deviceset: &str, device: &str, gate: &str) -> Option<u32> {
        self.gate_units
            .get(&GateKey::new(deviceset, device, gate))
            .copied()
    }

    pub fn package(&self, part_name: &str) -> Option<&str> {
        self.packages.get(part_name).map(String::as_str)
    }
}

/// Native part name for a device variant. `*` technology placeholders are
/// dropped.
pub fn part_name(deviceset: &str, device: &str) -> String {
    format!("{deviceset}{device}").replace('*', "")
}

/// Which mandatory fields a symbol placed explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoundFields {
    pub name: bool,
    pub value: bool,
}

/// Convert every device of a `<library>` and register the results.
pub fn load_library(session: &mut ImportSession, node: Node) -> Result<()> {
    let name = node
        .attribute("name")
        .ok_or(EagleError::MissingAttribute {
            element: "library",
            attr: "name",
        })?
        .to_string();
    let children = map_children(node);

    let symbols: HashMap<&str, Node> = children
        .get("symbols")
        .map(|symbols| {
            elements_named(symbols, "symbol")
                .filter_map(|s| Some((s.attribute("name")?, s)))
                .collect()
        })
        .unwrap_or_default();

    let mut library = EagleLibrary::new(&name);

    if let Some(devicesets) = children.get("devicesets") {
        for ds_node in elements_named(devicesets, EDeviceSet::TAG) {
            load_deviceset(session, &mut library, &symbols, ds_node)?;
        }
    }

    log::debug!(
        "Library {} converted into {} parts",
        name,
        library.part_names.len()
    );
    session.libraries.insert(name, library);
    Ok(())
}

fn load_deviceset(
    session: &mut ImportSession,
    library: &mut EagleLibrary,
    symbols: &HashMap<&str, Node>,
    node: Node,
) -> Result<()> {
    let deviceset = EDeviceSet::from_node(&node)?;
    let children = map_children(node);

    let gates = match children.get("gates") {
        Some(gates) => elements_named(gates, EGate::TAG)
            .map(|g| EGate::from_node(&g))
            .collect::<eagle_xml::Result<Vec<_>>>()?,
        None => Vec::new(),
    };
    let devices = match children.get("devices") {
        Some(devices) => elements_named(devices, EDevice::TAG)
            .map(|d| EDevice::from_node(&d))
            .collect::<eagle_xml::Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    let prefix = deviceset.prefix.as_deref().unwrap_or_default();

    for device in &devices {
        let name = part_name(&deviceset.name, &device.name);
        let mut part = LibPart::new(&name);
        part.unit_count = gates.len() as u32;

        if !prefix.is_empty() {
            part.field_mut(FieldId::Reference).text = prefix.to_string();
        }
        if let Some(package) = &device.package {
            part.field_mut(FieldId::Footprint).text = package.clone();
            library.packages.insert(name.clone(), package.clone());
        }

        let mut found = FoundFields::default();
        let mut power = false;

        for (index, gate) in gates.iter().enumerate() {
            let unit = index as u32 + 1;
            library.gate_units.insert(
                GateKey::new(&deviceset.name, &device.name, &gate.name),
                unit,
            );

            let symbol = symbols.get(gate.symbol.as_str()).ok_or_else(|| {
                ImportError::UnknownSymbol {
                    library: library.name.clone(),
                    symbol: gate.symbol.clone(),
                }
            })?;

            power = convert_symbol(*symbol, &mut part, unit, gate, device, &mut found)?;
        }

        part.field_mut(FieldId::Reference).effects.visible = found.name && !prefix.is_empty();
        part.field_mut(FieldId::Value).effects.visible = found.value;
        part.power = gates.len() == 1 && power;

        session.library.insert(part);
        library
            .part_names
            .insert((deviceset.name.clone(), device.name.clone()), name);
    }

    Ok(())
}

/// Draw one gate's symbol into `part` as `unit`.
///
/// Returns whether the symbol is a power symbol: a single pin that is a
/// supply pin.
pub fn convert_symbol(
    symbol: Node,
    part: &mut LibPart,
    unit: u32,
    gate: &EGate,
    device: &EDevice,
    found: &mut FoundFields,
) -> Result<bool> {
    let mut pin_count = 0;
    let mut supply = false;

    for child in elements(symbol) {
        match ElementKind::of(&child) {
            Some(ElementKind::Circle) => {
                let circle = ECircle::from_node(&child)?;
                part.add(
                    unit,
                    Shape::Circle {
                        center: to_native_point(circle.x, circle.y),
                        radius: to_native_length(circle.radius),
                        width: to_native_length(circle.width),
                    },
                );
            }
            Some(ElementKind::Rectangle) => {
                let rect = ERect::from_node(&child)?;
                part.add(unit, convert_rectangle(&rect));
            }
            Some(ElementKind::Polygon) => {
                let polygon = EPolygon::from_node(&child)?;
                part.add(unit, convert_polygon(&polygon));
            }
            Some(ElementKind::Wire) => {
                let wire = EWire::from_node(&child)?;
                part.add(unit, convert_wire(&wire));
            }
            Some(ElementKind::Pin) => {
                let pin = EPin::from_node(&child)?;
                pin_count += 1;
                if pin.direction == Some(PinDirection::Sup) {
                    supply = true;
                }
                for converted in convert_pin(&pin, pin_count, &gate.name, device) {
                    part.add(unit, Shape::Pin(converted));
                }
            }
            Some(ElementKind::Text) => {
                let text = EText::from_node(&child)?;
                let field = if text.text.eq_ignore_ascii_case(">NAME") {
                    found.name = true;
                    Some(FieldId::Reference)
                } else if text.text.eq_ignore_ascii_case(">VALUE") {
                    found.value = true;
                    Some(FieldId::Value)
                } else {
                    None
                };

                match field {
                    Some(id) => {
                        let field = part.field_mut(id);
                        field.position = to_native_point(text.x, text.y);
                        field.effects = text_effects(&text);
                    }
                    None => part.add(
                        unit,
                        Shape::Text {
                            position: to_native_point(text.x, text.y),
                            effects: text_effects(&text),
                            text: text.text,
                        },
                    ),
                }
            }
            _ => log::trace!(
                "Skipping <{}> in symbol {}",
                child.tag_name().name(),
                symbol.attribute("name").unwrap_or_default()
            ),
        }
    }

    Ok(pin_count == 1 && supply)
}

fn convert_rectangle(rect: &ERect) -> Shape {
    let mut start = to_native_point(rect.x1, rect.y1);
    let mut end = to_native_point(rect.x2, rect.y2);

    // Quarter-turned rectangles swap their extents about the centre
    if let Some(rot) = rect.rot
        && matches!(whole_degrees(rot.degrees), 90 | 270)
    {
        let centre = sch_model::midpoint(start, end);
        let half = Point::new((end.x - start.x) / 2, (end.y - start.y) / 2);
        start = centre + Point::new(-half.y, -half.x);
        end = centre + Point::new(half.y, half.x);
    }

    Shape::Rectangle {
        start,
        end,
        width: 0,
        fill: FillMode::Filled,
    }
}

fn convert_polygon(polygon: &EPolygon) -> Shape {
    let mut points: Vec<Point> = polygon
        .vertices
        .iter()
        .map(|v| to_native_point(v.x, v.y))
        .collect();
    if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied())
        && first != last
    {
        points.push(first);
    }

    Shape::Polyline {
        points,
        width: to_native_length(polygon.width),
        fill: FillMode::Filled,
    }
}

/// Straight wires become two-point polylines, curved ones arcs.
pub fn convert_wire(wire: &EWire) -> Shape {
    match wire.curve {
        Some(curve) if wire.is_curved() => convert_arc(wire, curve),
        _ => Shape::Polyline {
            points: vec![
                to_native_point(wire.x1, wire.y1),
                to_native_point(wire.x2, wire.y2),
            ],
            width: to_native_length(wire.width),
            fill: FillMode::None,
        },
    }
}

fn convert_arc(wire: &EWire, curve: f64) -> Shape {
    let native = |x: f64, y: f64| (x * EAGLE_TO_NATIVE, -y * EAGLE_TO_NATIVE);
    let begin = native(wire.x1, wire.y1);
    let finish = native(wire.x2, wire.y2);

    let centre = arc_centre(begin, finish, curve);
    let radius = (begin.0 - centre.0).hypot(begin.1 - centre.1);
    let (start, end) = if curve > 0.0 {
        (begin, finish)
    } else {
        (finish, begin)
    };

    let round = |p: (f64, f64)| Point::new(p.0.round() as i32, p.1.round() as i32);
    let width = f64::from(to_native_length(wire.width));

    if width > radius {
        // Thick arcs are drawn as a filled lozenge reaching the outer edge
        let outer = width + radius;
        let project = |p: (f64, f64)| {
            let (dx, dy) = (p.0 - centre.0, p.1 - centre.1);
            let len = dx.hypot(dy);
            if len == 0.0 {
                return round(p);
            }
            round((centre.0 + dx / len * outer, centre.1 + dy / len * outer))
        };
        return Shape::Arc {
            center: round(centre),
            radius: outer.round() as i32,
            start: project(start),
            end: project(end),
            width: 1,
            fill: FillMode::Filled,
        };
    }

    Shape::Arc {
        center: round(centre),
        radius: radius.round() as i32,
        start: round(start),
        end: round(end),
        width: width as i32,
        fill: FillMode::None,
    }
}

fn pin_orientation(degrees: f64) -> PinOrientation {
    match (whole_degrees(degrees) + 45) / 90 % 4 {
        0 => PinOrientation::Right,
        1 => PinOrientation::Up,
        2 => PinOrientation::Left,
        _ => PinOrientation::Down,
    }
}

fn pin_length(length: PinLength) -> i32 {
    match length {
        PinLength::Point => 0,
        PinLength::Short => 100,
        PinLength::Middle => 200,
        PinLength::Long => 300,
    }
}

fn pin_type(direction: Option<PinDirection>) -> PinType {
    match direction {
        Some(PinDirection::Sup) | Some(PinDirection::Pwr) => PinType::PowerIn,
        Some(PinDirection::Pas) => PinType::Passive,
        Some(PinDirection::Out) => PinType::Output,
        Some(PinDirection::In) => PinType::Input,
        Some(PinDirection::Nc) => PinType::NoConnect,
        Some(PinDirection::Io) => PinType::Bidirectional,
        Some(PinDirection::Oc) => PinType::OpenCollector,
        Some(PinDirection::Hiz) => PinType::TriState,
        None => PinType::Unspecified,
    }
}

fn pin_shape(function: Option<PinFunction>) -> PinShape {
    match function {
        Some(PinFunction::Dot) => PinShape::Inverted,
        Some(PinFunction::Clk) => PinShape::Clock,
        Some(PinFunction::DotClk) => PinShape::InvertedClock,
        Some(PinFunction::None) | None => PinShape::Line,
    }
}

/// Convert a symbol pin into one native pin per connected pad.
///
/// `index` is the 1-based position of the pin in its symbol and numbers the
/// pin when the device has no connects at all. A pin the device does not
/// connect is dropped.
pub fn convert_pin(pin: &EPin, index: usize, gate: &str, device: &EDevice) -> Vec<Pin> {
    let template = Pin {
        name: escape_name(&pin.name),
        number: index.to_string(),
        position: to_native_point(pin.x, pin.y),
        orientation: pin_orientation(pin.rot.degrees),
        length: pin_length(pin.length),
        pin_type: pin_type(pin.direction),
        shape: pin_shape(pin.function),
        name_visible: matches!(pin.visible, PinVisible::Both | PinVisible::Pin),
        number_visible: matches!(pin.visible, PinVisible::Both | PinVisible::Pad),
    };

    if device.connects.is_empty() {
        return vec![template];
    }

    let Some(connect) = device.connect_for(gate, &pin.name) else {
        log::debug!(
            "Pin {} of gate {} is not connected in device {}",
            pin.name,
            gate,
            device.name
        );
        return Vec::new();
    };

    let pads: Vec<&str> = connect.pads().collect();
    let fan_out = pads.len() > 1;

    pads.into_iter()
        .map(|pad| Pin {
            number: pad.to_string(),
            number_visible: template.number_visible && !fan_out,
            ..template.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eagle_xml::{EConnect, ERot};
    use roxmltree::Document;

    fn pin(name: &str) -> EPin {
        EPin {
            name: name.into(),
            x: 0.0,
            y: 0.0,
            visible: PinVisible::Both,
            length: PinLength::Short,
            direction: Some(PinDirection::Pas),
            function: None,
            swaplevel: 0,
            rot: ERot::default(),
        }
    }

    fn device(connects: &[(&str, &str, &str)]) -> EDevice {
        EDevice {
            name: "".into(),
            package: None,
            connects: connects
                .iter()
                .map(|(gate, pin, pad)| EConnect {
                    gate: gate.to_string(),
                    pin: pin.to_string(),
                    pad: pad.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_part_name_drops_placeholders() {
        assert_eq!(part_name("74*00", "N"), "7400N");
        assert_eq!(part_name("R", ""), "R");
    }

    #[test]
    fn test_pin_without_connects_uses_index() {
        let pins = convert_pin(&pin("A"), 3, "G$1", &device(&[]));
        assert_eq!(pins.len(), 1);
        assert_eq!(pins[0].number, "3");
        assert_eq!(pins[0].length, 100);
        assert_eq!(pins[0].pin_type, PinType::Passive);
    }

    #[test]
    fn test_pad_fan_out() {
        let dev = device(&[("G$1", "GND", "A1 A2 B1")]);
        let pins = convert_pin(&pin("GND"), 1, "G$1", &dev);
        let numbers: Vec<&str> = pins.iter().map(|p| p.number.as_str()).collect();
        assert_eq!(numbers, ["A1", "A2", "B1"]);
        assert!(pins.iter().all(|p| !p.number_visible && p.name == "GND"));
    }

    #[test]
    fn test_single_pad_keeps_number_visible() {
        let dev = device(&[("G$1", "A", "7")]);
        let pins = convert_pin(&pin("A"), 1, "G$1", &dev);
        assert_eq!(pins.len(), 1);
        assert!(pins[0].number_visible);
    }

    #[test]
    fn test_unconnected_pin_is_dropped() {
        let dev = device(&[("G$1", "A", "1")]);
        assert!(convert_pin(&pin("B"), 2, "G$1", &dev).is_empty());
        assert!(convert_pin(&pin("A"), 1, "G$2", &dev).is_empty());
    }

    #[test]
    fn test_pin_attributes() {
        let mut p = pin("!RST");
        p.rot = ERot::new(270.0);
        p.visible = PinVisible::Pad;
        p.function = Some(PinFunction::DotClk);
        p.direction = Some(PinDirection::Oc);
        p.length = PinLength::Point;

        let pins = convert_pin(&p, 1, "G$1", &device(&[]));
        let converted = &pins[0];
        assert_eq!(converted.name, "~RST");
        assert_eq!(converted.orientation, PinOrientation::Down);
        assert!(!converted.name_visible);
        assert!(converted.number_visible);
        assert_eq!(converted.shape, PinShape::InvertedClock);
        assert_eq!(converted.pin_type, PinType::OpenCollector);
        assert_eq!(converted.length, 0);
    }

    #[test]
    fn test_pin_directions() {
        assert_eq!(pin_type(Some(PinDirection::Sup)), PinType::PowerIn);
        assert_eq!(pin_type(Some(PinDirection::Pwr)), PinType::PowerIn);
        assert_eq!(pin_type(Some(PinDirection::Hiz)), PinType::TriState);
        assert_eq!(pin_type(Some(PinDirection::Nc)), PinType::NoConnect);
        assert_eq!(pin_type(None), PinType::Unspecified);
        assert_eq!(pin_orientation(90.0), PinOrientation::Up);
        assert_eq!(pin_orientation(180.0), PinOrientation::Left);
    }

    #[test]
    fn test_arc_conversion() {
        let wire = EWire {
            x1: 2.54,
            y1: 0.0,
            x2: 0.0,
            y2: 2.54,
            width: 0.254,
            layer: 94,
            curve: Some(90.0),
        };
        let Shape::Arc {
            center,
            radius,
            start,
            end,
            width,
            fill,
        } = convert_wire(&wire)
        else {
            panic!("expected an arc");
        };
        assert_eq!(center, Point::new(0, 0));
        assert_eq!(radius, 100);
        assert_eq!(start, Point::new(100, 0));
        assert_eq!(end, Point::new(0, -100));
        assert_eq!(width, 10);
        assert_eq!(fill, FillMode::None);
    }

    #[test]
    fn test_thick_arc_becomes_lozenge() {
        let wire = EWire {
            x1: 0.0,
            y1: 2.54,
            x2: 2.54,
            y2: 0.0,
            width: 5.08,
            layer: 94,
            curve: Some(-90.0),
        };
        let Shape::Arc {
            radius,
            start,
            end,
            width,
            fill,
            ..
        } = convert_wire(&wire)
        else {
            panic!("expected an arc");
        };
        assert_eq!(radius, 300);
        assert_eq!(start, Point::new(300, 0));
        assert_eq!(end, Point::new(0, -300));
        assert_eq!(width, 1);
        assert_eq!(fill, FillMode::Filled);
    }

    #[test]
    fn test_straight_wire_is_polyline() {
        let wire = EWire {
            x1: 0.0,
            y1: 0.0,
            x2: 2.54,
            y2: 2.54,
            width: 0.254,
            layer: 94,
            curve: None,
        };
        assert_eq!(
            convert_wire(&wire),
            Shape::Polyline {
                points: vec![Point::new(0, 0), Point::new(100, -100)],
                width: 10,
                fill: FillMode::None,
            }
        );
    }

    const LIBRARY: &str = r#"<library name="demo">
        <symbols>
            <symbol name="AMP">
                <wire x1="0" y1="0" x2="2.54" y2="0" width="0.254" layer="94"/>
                <pin name="IN" x="-2.54" y="0" length="short" direction="in"/>
                <pin name="OUT" x="5.08" y="0" length="short" direction="out" rot="R180"/>
                <text x="0" y="2.54" size="1.778" layer="95">&gt;NAME</text>
                <text x="0" y="-2.54" size="1.778" layer="96">&gt;VALUE</text>
            </symbol>
            <symbol name="PWR">
                <pin name="VCC" x="0" y="0" length="short" direction="sup" visible="off"/>
                <text x="0" y="2.54" size="1.778" layer="96">&gt;VALUE</text>
            </symbol>
            <symbol name="PAD">
                <pin name="P" x="0" y="0" length="point" direction="pas"/>
            </symbol>
            <symbol name="BARE">
                <circle x="0" y="0" radius="1.27" width="0.254" layer="94"/>
            </symbol>
        </symbols>
        <devicesets>
            <deviceset name="DUAL" prefix="IC">
                <gates>
                    <gate name="A" symbol="AMP" x="0" y="0"/>
                    <gate name="B" symbol="AMP" x="0" y="10"/>
                </gates>
                <devices>
                    <device name="-SO" package="SO8">
                        <connects>
                            <connect gate="A" pin="IN" pad="2"/>
                            <connect gate="A" pin="OUT" pad="1"/>
                            <connect gate="B" pin="IN" pad="6"/>
                            <connect gate="B" pin="OUT" pad="7"/>
                        </connects>
                    </device>
                </devices>
            </deviceset>
            <deviceset name="VCC" prefix="">
                <gates><gate name="G$1" symbol="PWR" x="0" y="0"/></gates>
                <devices><device name=""/></devices>
            </deviceset>
            <deviceset name="TP" prefix="TP">
                <gates><gate name="G$1" symbol="PAD" x="0" y="0"/></gates>
                <devices><device name=""/></devices>
            </deviceset>
            <deviceset name="RAILS">
                <gates>
                    <gate name="A" symbol="PWR" x="0" y="0"/>
                    <gate name="B" symbol="PWR" x="0" y="10"/>
                </gates>
                <devices><device name=""/></devices>
            </deviceset>
            <deviceset name="DOT">
                <gates><gate name="G$1" symbol="BARE" x="0" y="0"/></gates>
                <devices><device name=""/></devices>
            </deviceset>
        </devicesets>
    </library>"#;

    fn load(xml: &str) -> Result<ImportSession> {
        let doc = Document::parse(xml).unwrap();
        let mut session = ImportSession::new("test", 0);
        load_library(&mut session, doc.root_element())?;
        Ok(session)
    }

    #[test]
    fn test_multi_gate_device() {
        let session = load(LIBRARY).unwrap();
        let part = session.library.get("DUAL-SO").unwrap();

        assert_eq!(part.unit_count, 2);
        assert!(!part.power);
        assert_eq!(part.field(FieldId::Reference).unwrap().text, "IC");
        assert!(part.field(FieldId::Reference).unwrap().effects.visible);
        assert!(part.field(FieldId::Value).unwrap().effects.visible);
        assert_eq!(part.field(FieldId::Footprint).unwrap().text, "SO8");

        let unit_two: Vec<&str> = part
            .pins()
            .filter(|(unit, _)| *unit == 2)
            .map(|(_, p)| p.number.as_str())
            .collect();
        assert_eq!(unit_two, ["6", "7"]);

        let lib = &session.libraries["demo"];
        assert_eq!(lib.gate_unit("DUAL", "-SO", "B"), Some(2));
        assert_eq!(lib.part_name("DUAL", "-SO"), Some("DUAL-SO"));
        assert_eq!(lib.package("DUAL-SO"), Some("SO8"));
    }

    #[test]
    fn test_power_symbol_inference() {
        let session = load(LIBRARY).unwrap();
        let vcc = session.library.get("VCC").unwrap();
        assert!(vcc.power);
        assert_eq!(vcc.unit_count, 1);
        // No prefix: reference stays hidden even without a >NAME text
        assert!(!vcc.field(FieldId::Reference).unwrap().effects.visible);
        assert!(vcc.field(FieldId::Value).unwrap().effects.visible);

        // A lone pin that is not a supply pin
        let tp = session.library.get("TP").unwrap();
        assert_eq!(tp.pins().count(), 1);
        assert!(!tp.power);

        // Supply symbol, but two gates
        let rails = session.library.get("RAILS").unwrap();
        assert_eq!(rails.unit_count, 2);
        assert!(!rails.power);
    }

    #[test]
    fn test_fields_hidden_when_symbol_lacks_them() {
        let session = load(LIBRARY).unwrap();
        let dot = session.library.get("DOT").unwrap();
        assert!(!dot.field(FieldId::Reference).unwrap().effects.visible);
        assert!(!dot.field(FieldId::Value).unwrap().effects.visible);
        assert_eq!(dot.items.len(), 1);
    }

    #[test]
    fn test_unknown_symbol_is_fatal() {
        let xml = r#"<library name="broken">
            <symbols/>
            <devicesets>
                <deviceset name="X">
                    <gates><gate name="G$1" symbol="MISSING" x="0" y="0"/></gates>
                    <devices><device name=""/></devices>
                </deviceset>
            </devicesets>
        </library>"#;
        let err = load(xml).unwrap_err();
        assert!(matches!(
            err,
            ImportError::UnknownSymbol { ref library, ref symbol }
                if library == "broken" && symbol == "MISSING"
        ));
    }
}
