use crate::index::{elements, elements_named};
use crate::types::*;
use crate::{EagleError, Result};
use roxmltree::Node;
use std::str::FromStr;

/// An EAGLE element decoded into a typed record
pub trait Record: Sized {
    const TAG: &'static str;

    fn from_node(node: &Node) -> Result<Self>;
}

fn required_attr(node: &Node, attr: &'static str, element: &'static str) -> Result<String> {
    node.attribute(attr)
        .map(str::to_string)
        .ok_or(EagleError::MissingAttribute { element, attr })
}

fn optional_attr(node: &Node, attr: &str) -> Option<String> {
    node.attribute(attr).map(str::to_string)
}

fn parse_number<T: FromStr>(value: &str, attr: &'static str, element: &'static str) -> Result<T> {
    value.trim().parse().map_err(|_| EagleError::InvalidNumber {
        element,
        attr,
        value: value.to_string(),
    })
}

/// Largest magnitude accepted for a real-valued attribute. Keeps every
/// converted coordinate well inside `i32` mils.
const MAX_DIMENSION: f64 = 2.0e6;

fn parse_f64(value: &str, attr: &'static str, element: &'static str) -> Result<f64> {
    let number: f64 = parse_number(value, attr, element)?;
    if number.is_finite() && number.abs() <= MAX_DIMENSION {
        Ok(number)
    } else {
        Err(EagleError::InvalidNumber {
            element,
            attr,
            value: value.to_string(),
        })
    }
}

fn parse_f64_attr(node: &Node, attr: &'static str, element: &'static str) -> Result<f64> {
    let value = node
        .attribute(attr)
        .ok_or(EagleError::MissingAttribute { element, attr })?;
    parse_f64(value, attr, element)
}

fn optional_f64_attr(node: &Node, attr: &'static str, element: &'static str) -> Result<Option<f64>> {
    node.attribute(attr)
        .map(|v| parse_f64(v, attr, element))
        .transpose()
}

fn parse_i32_attr(node: &Node, attr: &'static str, element: &'static str) -> Result<i32> {
    let value = node
        .attribute(attr)
        .ok_or(EagleError::MissingAttribute { element, attr })?;
    parse_number(value, attr, element)
}

fn optional_i32_attr(node: &Node, attr: &'static str, element: &'static str) -> Result<Option<i32>> {
    node.attribute(attr)
        .map(|v| parse_number(v, attr, element))
        .transpose()
}

fn optional_enum_attr<T: FromStr>(
    node: &Node,
    attr: &'static str,
    element: &'static str,
) -> Result<Option<T>> {
    node.attribute(attr)
        .map(|v| {
            v.parse().map_err(|_| EagleError::InvalidValue {
                element,
                attr,
                value: v.to_string(),
            })
        })
        .transpose()
}

fn parse_bool_attr(
    node: &Node,
    attr: &'static str,
    element: &'static str,
    default: bool,
) -> Result<bool> {
    match node.attribute(attr) {
        None => Ok(default),
        Some("yes") => Ok(true),
        Some("no") => Ok(false),
        Some(other) => Err(EagleError::InvalidValue {
            element,
            attr,
            value: other.to_string(),
        }),
    }
}

impl Record for EWire {
    const TAG: &'static str = "wire";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(EWire {
            x1: parse_f64_attr(node, "x1", Self::TAG)?,
            y1: parse_f64_attr(node, "y1", Self::TAG)?,
            x2: parse_f64_attr(node, "x2", Self::TAG)?,
            y2: parse_f64_attr(node, "y2", Self::TAG)?,
            width: parse_f64_attr(node, "width", Self::TAG)?,
            layer: parse_i32_attr(node, "layer", Self::TAG)?,
            curve: optional_f64_attr(node, "curve", Self::TAG)?,
        })
    }
}

impl Record for EJunction {
    const TAG: &'static str = "junction";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(EJunction {
            x: parse_f64_attr(node, "x", Self::TAG)?,
            y: parse_f64_attr(node, "y", Self::TAG)?,
        })
    }
}

impl Record for ELabel {
    const TAG: &'static str = "label";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(ELabel {
            x: parse_f64_attr(node, "x", Self::TAG)?,
            y: parse_f64_attr(node, "y", Self::TAG)?,
            size: parse_f64_attr(node, "size", Self::TAG)?,
            layer: parse_i32_attr(node, "layer", Self::TAG)?,
            font: optional_enum_attr(node, "font", Self::TAG)?.unwrap_or(TextFont::Proportional),
            ratio: optional_f64_attr(node, "ratio", Self::TAG)?.unwrap_or(8.0),
            rot: optional_enum_attr(node, "rot", Self::TAG)?.unwrap_or_default(),
            xref: parse_bool_attr(node, "xref", Self::TAG, false)?,
        })
    }
}

impl Record for EPin {
    const TAG: &'static str = "pin";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(EPin {
            name: required_attr(node, "name", Self::TAG)?,
            x: parse_f64_attr(node, "x", Self::TAG)?,
            y: parse_f64_attr(node, "y", Self::TAG)?,
            visible: optional_enum_attr(node, "visible", Self::TAG)?.unwrap_or_default(),
            length: optional_enum_attr(node, "length", Self::TAG)?.unwrap_or_default(),
            direction: optional_enum_attr(node, "direction", Self::TAG)?,
            function: optional_enum_attr(node, "function", Self::TAG)?,
            swaplevel: optional_i32_attr(node, "swaplevel", Self::TAG)?.unwrap_or(0),
            rot: optional_enum_attr(node, "rot", Self::TAG)?.unwrap_or_default(),
        })
    }
}

impl Record for EPinRef {
    const TAG: &'static str = "pinref";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(EPinRef {
            part: required_attr(node, "part", Self::TAG)?,
            gate: required_attr(node, "gate", Self::TAG)?,
            pin: required_attr(node, "pin", Self::TAG)?,
        })
    }
}

impl Record for ECircle {
    const TAG: &'static str = "circle";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(ECircle {
            x: parse_f64_attr(node, "x", Self::TAG)?,
            y: parse_f64_attr(node, "y", Self::TAG)?,
            radius: parse_f64_attr(node, "radius", Self::TAG)?,
            width: parse_f64_attr(node, "width", Self::TAG)?,
            layer: parse_i32_attr(node, "layer", Self::TAG)?,
        })
    }
}

impl Record for ERect {
    const TAG: &'static str = "rectangle";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(ERect {
            x1: parse_f64_attr(node, "x1", Self::TAG)?,
            y1: parse_f64_attr(node, "y1", Self::TAG)?,
            x2: parse_f64_attr(node, "x2", Self::TAG)?,
            y2: parse_f64_attr(node, "y2", Self::TAG)?,
            layer: parse_i32_attr(node, "layer", Self::TAG)?,
            rot: optional_enum_attr(node, "rot", Self::TAG)?,
        })
    }
}

impl Record for EVertex {
    const TAG: &'static str = "vertex";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(EVertex {
            x: parse_f64_attr(node, "x", Self::TAG)?,
            y: parse_f64_attr(node, "y", Self::TAG)?,
            curve: optional_f64_attr(node, "curve", Self::TAG)?,
        })
    }
}

impl Record for EPolygon {
    const TAG: &'static str = "polygon";

    fn from_node(node: &Node) -> Result<Self> {
        let vertices = elements_named(*node, EVertex::TAG)
            .map(|v| EVertex::from_node(&v))
            .collect::<Result<Vec<_>>>()?;

        Ok(EPolygon {
            width: parse_f64_attr(node, "width", Self::TAG)?,
            layer: parse_i32_attr(node, "layer", Self::TAG)?,
            vertices,
        })
    }
}

impl Record for EText {
    const TAG: &'static str = "text";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(EText {
            text: node.text().unwrap_or_default().to_string(),
            x: parse_f64_attr(node, "x", Self::TAG)?,
            y: parse_f64_attr(node, "y", Self::TAG)?,
            size: parse_f64_attr(node, "size", Self::TAG)?,
            layer: optional_i32_attr(node, "layer", Self::TAG)?,
            font: optional_enum_attr(node, "font", Self::TAG)?,
            ratio: optional_f64_attr(node, "ratio", Self::TAG)?.unwrap_or(8.0),
            rot: optional_enum_attr(node, "rot", Self::TAG)?.unwrap_or_default(),
            align: optional_enum_attr(node, "align", Self::TAG)?.unwrap_or_default(),
        })
    }
}

impl Record for EAttr {
    const TAG: &'static str = "attribute";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(EAttr {
            name: required_attr(node, "name", Self::TAG)?,
            value: optional_attr(node, "value"),
            x: optional_f64_attr(node, "x", Self::TAG)?,
            y: optional_f64_attr(node, "y", Self::TAG)?,
            size: optional_f64_attr(node, "size", Self::TAG)?,
            layer: optional_i32_attr(node, "layer", Self::TAG)?,
            font: optional_enum_attr(node, "font", Self::TAG)?,
            ratio: optional_f64_attr(node, "ratio", Self::TAG)?,
            rot: optional_enum_attr(node, "rot", Self::TAG)?,
            align: optional_enum_attr(node, "align", Self::TAG)?,
            display: optional_enum_attr(node, "display", Self::TAG)?.unwrap_or_default(),
            constant: parse_bool_attr(node, "constant", Self::TAG, false)?,
        })
    }
}

impl Record for EInstance {
    const TAG: &'static str = "instance";

    fn from_node(node: &Node) -> Result<Self> {
        let attributes = elements_named(*node, EAttr::TAG)
            .map(|a| EAttr::from_node(&a))
            .collect::<Result<Vec<_>>>()?;

        Ok(EInstance {
            part: required_attr(node, "part", Self::TAG)?,
            gate: required_attr(node, "gate", Self::TAG)?,
            x: parse_f64_attr(node, "x", Self::TAG)?,
            y: parse_f64_attr(node, "y", Self::TAG)?,
            smashed: parse_bool_attr(node, "smashed", Self::TAG, false)?,
            rot: optional_enum_attr(node, "rot", Self::TAG)?,
            attributes,
        })
    }
}

impl Record for EPart {
    const TAG: &'static str = "part";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(EPart {
            name: required_attr(node, "name", Self::TAG)?,
            library: required_attr(node, "library", Self::TAG)?,
            deviceset: required_attr(node, "deviceset", Self::TAG)?,
            device: required_attr(node, "device", Self::TAG)?,
            technology: optional_attr(node, "technology").unwrap_or_default(),
            value: optional_attr(node, "value"),
        })
    }
}

impl Record for EDeviceSet {
    const TAG: &'static str = "deviceset";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(EDeviceSet {
            name: required_attr(node, "name", Self::TAG)?,
            prefix: optional_attr(node, "prefix"),
            uservalue: parse_bool_attr(node, "uservalue", Self::TAG, false)?,
        })
    }
}

impl Record for EConnect {
    const TAG: &'static str = "connect";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(EConnect {
            gate: required_attr(node, "gate", Self::TAG)?,
            pin: required_attr(node, "pin", Self::TAG)?,
            pad: required_attr(node, "pad", Self::TAG)?,
        })
    }
}

impl Record for EDevice {
    const TAG: &'static str = "device";

    fn from_node(node: &Node) -> Result<Self> {
        let mut connects = Vec::new();
        for child in elements(*node) {
            if child.tag_name().name() == "connects" {
                for connect in elements_named(child, EConnect::TAG) {
                    connects.push(EConnect::from_node(&connect)?);
                }
            }
        }

        Ok(EDevice {
            name: required_attr(node, "name", Self::TAG)?,
            package: optional_attr(node, "package"),
            connects,
        })
    }
}

impl Record for EGate {
    const TAG: &'static str = "gate";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(EGate {
            name: required_attr(node, "name", Self::TAG)?,
            symbol: required_attr(node, "symbol", Self::TAG)?,
            x: parse_f64_attr(node, "x", Self::TAG)?,
            y: parse_f64_attr(node, "y", Self::TAG)?,
            addlevel: optional_attr(node, "addlevel"),
            swaplevel: optional_i32_attr(node, "swaplevel", Self::TAG)?,
        })
    }
}

impl Record for ELayer {
    const TAG: &'static str = "layer";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(ELayer {
            number: parse_i32_attr(node, "number", Self::TAG)?,
            name: required_attr(node, "name", Self::TAG)?,
            color: parse_i32_attr(node, "color", Self::TAG)?,
            fill: parse_i32_attr(node, "fill", Self::TAG)?,
            visible: parse_bool_attr(node, "visible", Self::TAG, true)?,
            active: parse_bool_attr(node, "active", Self::TAG, true)?,
        })
    }
}

impl Record for ENet {
    const TAG: &'static str = "net";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(ENet {
            name: required_attr(node, "name", Self::TAG)?,
            class: optional_i32_attr(node, "class", Self::TAG)?,
        })
    }
}

impl Record for EBus {
    const TAG: &'static str = "bus";

    fn from_node(node: &Node) -> Result<Self> {
        Ok(EBus {
            name: required_attr(node, "name", Self::TAG)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn parse<T: Record>(xml: &str) -> Result<T> {
        let doc = Document::parse(xml).unwrap();
        T::from_node(&doc.root_element())
    }

    #[test]
    fn wire_with_curve() {
        let wire: EWire =
            parse(r#"<wire x1="0" y1="0" x2="2.54" y2="0" width="0.1524" layer="94" curve="-90"/>"#)
                .unwrap();
        assert_eq!(wire.x2, 2.54);
        assert_eq!(wire.layer, 94);
        assert_eq!(wire.curve, Some(-90.0));
        assert!(wire.is_curved());
    }

    #[test]
    fn wire_missing_attribute() {
        let err = parse::<EWire>(r#"<wire x1="0" y1="0" x2="1" width="0.1" layer="91"/>"#)
            .unwrap_err();
        assert!(matches!(
            err,
            EagleError::MissingAttribute {
                element: "wire",
                attr: "y2"
            }
        ));
    }

    #[test]
    fn invalid_number_is_reported() {
        let err = parse::<EJunction>(r#"<junction x="abc" y="1"/>"#).unwrap_err();
        assert!(matches!(err, EagleError::InvalidNumber { attr: "x", .. }));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let err = parse::<EJunction>(r#"<junction x="1e9" y="1"/>"#).unwrap_err();
        assert!(matches!(err, EagleError::InvalidNumber { attr: "x", .. }));

        let err = parse::<EJunction>(r#"<junction x="0" y="-inf"/>"#).unwrap_err();
        assert!(matches!(err, EagleError::InvalidNumber { attr: "y", .. }));

        let err = parse::<EWire>(
            r#"<wire x1="0" y1="0" x2="1" y2="1" width="0.1" layer="91" curve="NaN"/>"#,
        )
        .unwrap_err();
        assert!(matches!(err, EagleError::InvalidNumber { attr: "curve", .. }));

        let ok = parse::<EJunction>(r#"<junction x="-2000000" y="2000000"/>"#).unwrap();
        assert_eq!(ok.x, -2.0e6);
    }

    #[test]
    fn label_defaults() {
        let label: ELabel = parse(r#"<label x="1" y="2" size="1.778" layer="95"/>"#).unwrap();
        assert_eq!(label.font, TextFont::Proportional);
        assert_eq!(label.ratio, 8.0);
        assert_eq!(label.rot, ERot::default());
        assert!(!label.xref);
    }

    #[test]
    fn pin_defaults_and_keywords() {
        let pin: EPin = parse(r#"<pin name="VCC" x="0" y="5.08" direction="sup" rot="R270"/>"#)
            .unwrap();
        assert_eq!(pin.length, PinLength::Long);
        assert_eq!(pin.visible, PinVisible::Both);
        assert_eq!(pin.direction, Some(PinDirection::Sup));
        assert_eq!(pin.function, None);
        assert_eq!(pin.rot.degrees, 270.0);

        let err = parse::<EPin>(r#"<pin name="A" x="0" y="0" length="huge"/>"#).unwrap_err();
        assert!(matches!(err, EagleError::InvalidValue { attr: "length", .. }));
    }

    #[test]
    fn text_content_and_alignment() {
        let text: EText =
            parse(r#"<text x="1" y="2" size="1.27" layer="94" align="top-left">&gt;NAME</text>"#)
                .unwrap();
        assert_eq!(text.text, ">NAME");
        assert_eq!(text.align, Align::TopLeft);
        assert_eq!(text.font, None);
        assert_eq!(text.rot, ERot::default());
    }

    #[test]
    fn instance_with_attributes() {
        let inst: EInstance = parse(
            r#"<instance part="R1" gate="G$1" x="10" y="20" smashed="yes" rot="MR90">
                <attribute name="NAME" x="11" y="21" size="1.778" layer="95" display="off"/>
                <attribute name="VALUE" x="11" y="19" size="1.778" layer="96"/>
                <attribute name="VALUE" x="12" y="19" size="1.778" layer="96" display="both"/>
            </instance>"#,
        )
        .unwrap();
        assert!(inst.smashed);
        assert!(inst.rot.unwrap().mirror);
        assert_eq!(inst.attributes.len(), 3);
        assert_eq!(inst.attribute("NAME").unwrap().display, AttrDisplay::Off);
        assert!(inst.attribute("name").is_none());
        // The last VALUE override wins
        assert_eq!(inst.attribute("VALUE").unwrap().display, AttrDisplay::Both);
    }

    #[test]
    fn bool_attributes_are_strict() {
        let err = parse::<EInstance>(r#"<instance part="R1" gate="G" x="0" y="0" smashed="true"/>"#)
            .unwrap_err();
        assert!(matches!(err, EagleError::InvalidValue { attr: "smashed", .. }));
    }

    #[test]
    fn device_collects_connects() {
        let device: EDevice = parse(
            r#"<device name="" package="SOT23">
                <connects>
                    <connect gate="G$1" pin="A" pad="1"/>
                    <connect gate="G$1" pin="K" pad="2 3"/>
                </connects>
                <technologies><technology name=""/></technologies>
            </device>"#,
        )
        .unwrap();
        assert_eq!(device.name, "");
        assert_eq!(device.package.as_deref(), Some("SOT23"));
        assert_eq!(device.connects.len(), 2);
        assert_eq!(device.connect_for("G$1", "K").unwrap().pads().count(), 2);
    }

    #[test]
    fn polygon_vertices() {
        let poly: EPolygon = parse(
            r#"<polygon width="0.254" layer="94">
                <vertex x="0" y="0"/><vertex x="1" y="0" curve="90"/><vertex x="1" y="1"/>
            </polygon>"#,
        )
        .unwrap();
        assert_eq!(poly.vertices.len(), 3);
        assert_eq!(poly.vertices[1].curve, Some(90.0));
    }

    #[test]
    fn layer_and_part_defaults() {
        let layer: ELayer =
            parse(r#"<layer number="91" name="Nets" color="2" fill="1"/>"#).unwrap();
        assert!(layer.visible && layer.active);

        let part: EPart =
            parse(r#"<part name="U1" library="lib" deviceset="OPAMP" device="D"/>"#).unwrap();
        assert_eq!(part.technology, "");
        assert_eq!(part.value, None);
    }
}
