//! Nets, busses and their labels.

use std::collections::HashSet;

use eagle_xml::{
    EJunction, ELabel, ENet, EPinRef, EWire, ElementKind, Record, elements, elements_named,
    map_children,
};
use roxmltree::Node;
use sch_model::{
    Junction, Label, LabelKind, Line, Point, SchItem, Screen, TextEffects, midpoint, segment_hit,
};

use crate::error::Result;
use crate::session::ImportSession;
use crate::units::{to_native_length, to_native_point};

/// Size of labels added to unlabelled segments.
const SYNTHETIC_LABEL_SIZE: i32 = 10;

/// Escape a net or pin name: `~` is doubled, `!` (overbar) becomes `~`.
pub fn escape_name(name: &str) -> String {
    name.replace('~', "~~").replace('!', "~")
}

/// Count, per net name, the sheets it appears on.
///
/// A net listed on several sheets is connected across them and gets global
/// labels everywhere.
pub fn count_nets(session: &mut ImportSession, sheets: Node) -> Result<()> {
    for sheet in elements_named(sheets, "sheet") {
        let Some(nets) = map_children(sheet).get("nets") else {
            continue;
        };
        let names = elements_named(nets, ENet::TAG)
            .map(|n| ENet::from_node(&n).map(|net| net.name))
            .collect::<eagle_xml::Result<HashSet<_>>>()?;
        for name in names {
            *session.net_counts.entry(name).or_default() += 1;
        }
    }
    Ok(())
}

pub fn load_wire(session: &ImportSession, wire: &EWire) -> Line {
    Line::new(
        session.line_layer(wire.layer),
        to_native_point(wire.x1, wire.y1),
        to_native_point(wire.x2, wire.y2),
    )
}

/// Closest start, midpoint or end of `lines` to `p`. Ties keep the first.
pub fn nearest_line_point(p: Point, lines: &[Line]) -> Option<Point> {
    let mut best: Option<(f64, Point)> = None;
    for line in lines {
        for candidate in [line.start, midpoint(line.start, line.end), line.end] {
            let d = p.distance(candidate);
            if best.is_none_or(|(dist, _)| d < dist) {
                best = Some((d, candidate));
            }
        }
    }
    best.map(|(_, point)| point)
}

pub fn label_spin(label: &ELabel) -> u8 {
    let quarter = ((label.rot.degrees / 90.0) as i64).rem_euclid(4);
    let quarter = if label.rot.mirror && quarter % 2 == 0 {
        (quarter + 2) % 4
    } else {
        quarter
    };
    quarter as u8
}

/// Convert a label of net `name`. Labels off the wires snap to the nearest
/// wire end or midpoint.
pub fn load_label(label: &ELabel, name: &str, net_count: usize, wires: &[Line]) -> Label {
    let position = to_native_point(label.x, label.y);
    let on_wire = wires
        .iter()
        .any(|w| segment_hit(position, w.start, w.end, 0));
    let position = if on_wire {
        position
    } else {
        nearest_line_point(position, wires).unwrap_or(position)
    };

    let size = to_native_length(label.size);
    Label {
        kind: if net_count > 1 {
            LabelKind::Global
        } else {
            LabelKind::Local
        },
        text: escape_name(name),
        position,
        spin: label_spin(label),
        effects: TextEffects::with_size(size, size),
    }
}

/// Load every segment of a `<net>` or `<bus>` named `name` onto `screen`.
pub fn load_segments(
    session: &ImportSession,
    screen: &mut Screen,
    name: &str,
    node: Node,
) -> Result<()> {
    let segments: Vec<Node> = elements_named(node, "segment").collect();
    let net_count = session.net_count(name);

    for segment in &segments {
        let wires = elements_named(*segment, EWire::TAG)
            .map(|w| EWire::from_node(&w).map(|wire| load_wire(session, &wire)))
            .collect::<eagle_xml::Result<Vec<_>>>()?;

        let mut labelled = false;
        for child in elements(*segment) {
            match ElementKind::of(&child) {
                Some(ElementKind::Wire) => {}
                Some(ElementKind::Junction) => {
                    let junction = EJunction::from_node(&child)?;
                    screen.push(SchItem::Junction(Junction {
                        position: to_native_point(junction.x, junction.y),
                    }));
                }
                Some(ElementKind::Label) => {
                    let label = ELabel::from_node(&child)?;
                    screen.push(SchItem::Label(load_label(&label, name, net_count, &wires)));
                    labelled = true;
                }
                Some(ElementKind::PinRef) => {
                    EPinRef::from_node(&child)?;
                }
                _ => log::trace!("Skipping <{}> in net {}", child.tag_name().name(), name),
            }
        }

        if !labelled && let Some(first) = wires.first() {
            let kind = if net_count > 1 {
                Some(LabelKind::Global)
            } else if segments.len() > 1 {
                Some(LabelKind::Local)
            } else {
                None
            };
            if let Some(kind) = kind {
                screen.push(SchItem::Label(Label {
                    kind,
                    text: escape_name(name),
                    position: midpoint(first.start, first.end),
                    spin: 0,
                    effects: TextEffects::with_size(SYNTHETIC_LABEL_SIZE, SYNTHETIC_LABEL_SIZE),
                }));
            }
        }

        for wire in wires {
            screen.push(SchItem::Line(wire));
        }
    }

    Ok(())
}
