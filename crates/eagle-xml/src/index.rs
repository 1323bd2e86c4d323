use crate::{EagleError, Result};
use roxmltree::Node;
use std::collections::HashMap;

/// Every element tag the importer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Eagle,
    Drawing,
    Settings,
    Grid,
    Layers,
    Layer,
    Schematic,
    Description,
    Libraries,
    Library,
    Packages,
    Symbols,
    Symbol,
    DeviceSets,
    DeviceSet,
    Gates,
    Gate,
    Devices,
    Device,
    Connects,
    Connect,
    Technologies,
    Parts,
    Part,
    Sheets,
    Sheet,
    Plain,
    Instances,
    Instance,
    Attribute,
    Busses,
    Bus,
    Nets,
    Net,
    Segment,
    Wire,
    Junction,
    Label,
    PinRef,
    Pin,
    Circle,
    Rectangle,
    Polygon,
    Vertex,
    Text,
}

const KINDS: &[(ElementKind, &str)] = &[
    (ElementKind::Eagle, "eagle"),
    (ElementKind::Drawing, "drawing"),
    (ElementKind::Settings, "settings"),
    (ElementKind::Grid, "grid"),
    (ElementKind::Layers, "layers"),
    (ElementKind::Layer, "layer"),
    (ElementKind::Schematic, "schematic"),
    (ElementKind::Description, "description"),
    (ElementKind::Libraries, "libraries"),
    (ElementKind::Library, "library"),
    (ElementKind::Packages, "packages"),
    (ElementKind::Symbols, "symbols"),
    (ElementKind::Symbol, "symbol"),
    (ElementKind::DeviceSets, "devicesets"),
    (ElementKind::DeviceSet, "deviceset"),
    (ElementKind::Gates, "gates"),
    (ElementKind::Gate, "gate"),
    (ElementKind::Devices, "devices"),
    (ElementKind::Device, "device"),
    (ElementKind::Connects, "connects"),
    (ElementKind::Connect, "connect"),
    (ElementKind::Technologies, "technologies"),
    (ElementKind::Parts, "parts"),
    (ElementKind::Part, "part"),
    (ElementKind::Sheets, "sheets"),
    (ElementKind::Sheet, "sheet"),
    (ElementKind::Plain, "plain"),
    (ElementKind::Instances, "instances"),
    (ElementKind::Instance, "instance"),
    (ElementKind::Attribute, "attribute"),
    (ElementKind::Busses, "busses"),
    (ElementKind::Bus, "bus"),
    (ElementKind::Nets, "nets"),
    (ElementKind::Net, "net"),
    (ElementKind::Segment, "segment"),
    (ElementKind::Wire, "wire"),
    (ElementKind::Junction, "junction"),
    (ElementKind::Label, "label"),
    (ElementKind::PinRef, "pinref"),
    (ElementKind::Pin, "pin"),
    (ElementKind::Circle, "circle"),
    (ElementKind::Rectangle, "rectangle"),
    (ElementKind::Polygon, "polygon"),
    (ElementKind::Vertex, "vertex"),
    (ElementKind::Text, "text"),
];

impl ElementKind {
    /// Decode a node's tag. Unknown tags and non-element nodes give `None`.
    pub fn of(node: &Node) -> Option<Self> {
        if !node.is_element() {
            return None;
        }
        let name = node.tag_name().name();
        KINDS
            .iter()
            .find(|(_, tag)| *tag == name)
            .map(|(kind, _)| *kind)
    }

    pub fn tag(self) -> &'static str {
        KINDS
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, tag)| *tag)
            .unwrap_or_default()
    }
}

/// Element children of a node, keyed by tag name
///
/// Only the first child with a given tag is kept. Repeated tags are reached
/// by iterating the container with [`elements`].
#[derive(Debug, Default)]
pub struct NodeMap<'a, 'input> {
    nodes: HashMap<&'a str, Node<'a, 'input>>,
}

impl<'a, 'input> NodeMap<'a, 'input> {
    pub fn get(&self, tag: &str) -> Option<Node<'a, 'input>> {
        self.nodes.get(tag).copied()
    }

    pub fn require(&self, tag: &'static str) -> Result<Node<'a, 'input>> {
        self.get(tag).ok_or(EagleError::MissingElement(tag))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.nodes.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

pub fn map_children<'a, 'input>(node: Node<'a, 'input>) -> NodeMap<'a, 'input> {
    let mut nodes = HashMap::new();
    for child in elements(node) {
        nodes.entry(child.tag_name().name()).or_insert(child);
    }
    NodeMap { nodes }
}

pub fn count_children(node: Node, tag: &str) -> usize {
    elements(node)
        .filter(|n| n.tag_name().name() == tag)
        .count()
}

pub fn elements<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

/// Element children with the given tag, in document order.
pub fn elements_named<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    elements(node).filter(move |n| n.tag_name().name() == tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const XML: &str = r#"<sheet>
        <description>first</description>
        <plain/>
        <description>second</description>
        <!-- comment -->
        <nets><net name="A"/><net name="B"/><net name="C"/></nets>
    </sheet>"#;

    #[test]
    fn map_keeps_first_seen_child() {
        let doc = Document::parse(XML).unwrap();
        let map = map_children(doc.root_element());
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("description").unwrap().text(), Some("first"));
        assert!(map.contains("plain"));
        assert!(map.get("instances").is_none());
    }

    #[test]
    fn require_reports_missing_element() {
        let doc = Document::parse(XML).unwrap();
        let map = map_children(doc.root_element());
        let err = map.require("busses").unwrap_err();
        assert!(matches!(err, EagleError::MissingElement("busses")));
    }

    #[test]
    fn count_direct_children_only() {
        let doc = Document::parse(XML).unwrap();
        let root = doc.root_element();
        assert_eq!(count_children(root, "description"), 2);
        assert_eq!(count_children(root, "net"), 0);

        let nets = map_children(root).get("nets").unwrap();
        assert_eq!(count_children(nets, "net"), 3);
        assert_eq!(elements_named(nets, "net").count(), 3);
    }

    #[test]
    fn element_kind_decoding() {
        let doc = Document::parse("<eagle><segment/><frame/></eagle>").unwrap();
        let root = doc.root_element();
        assert_eq!(ElementKind::of(&root), Some(ElementKind::Eagle));

        let kinds: Vec<_> = elements(root).map(|n| ElementKind::of(&n)).collect();
        assert_eq!(kinds, [Some(ElementKind::Segment), None]);
        assert_eq!(ElementKind::PinRef.tag(), "pinref");
    }
}
