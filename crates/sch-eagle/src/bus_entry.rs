//! Bus entry insertion.
//!
//! EAGLE lets a wire end directly on a bus. The native model joins them
//! through a diagonal bus entry, so each such wire is shortened by one entry
//! length and the gap is bridged with an entry glyph.

use sch_model::{
    BUS_ENTRY_SIZE, BusEntry, Line, LineLayer, Marker, Point, SchItem, Screen, segment_hit,
};

pub const BUS_ENTRY_NEEDED: &str = "Bus entry needed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WireEnd {
    Start,
    End,
}

impl WireEnd {
    /// (this end, other end)
    fn points(self, line: &Line) -> (Point, Point) {
        match self {
            WireEnd::Start => (line.start, line.end),
            WireEnd::End => (line.end, line.start),
        }
    }

    fn set(self, line: &mut Line, p: Point) {
        match self {
            WireEnd::Start => line.start = p,
            WireEnd::End => line.end = p,
        }
    }
}

/// Probe offsets along a bus, tried in order.
///
/// The negative side is tried first, except for the far end of a wire that
/// reaches a vertical bus from the left.
fn bus_probes(bus: &Line, end: WireEnd, d: Point) -> Option<[Point; 2]> {
    let [first, second] = if bus.is_vertical() {
        [
            Point::new(0, -BUS_ENTRY_SIZE),
            Point::new(0, BUS_ENTRY_SIZE),
        ]
    } else if bus.is_horizontal() {
        [
            Point::new(-BUS_ENTRY_SIZE, 0),
            Point::new(BUS_ENTRY_SIZE, 0),
        ]
    } else {
        return None;
    };

    if bus.is_vertical() && end == WireEnd::End && d.x < 0 {
        Some([second, first])
    } else {
        Some([first, second])
    }
}

/// Entry for a wire ending at `at` on `bus`, and the wire's new end.
fn plan_entry(bus: &Line, end: WireEnd, at: Point, other: Point) -> Option<(BusEntry, Point)> {
    let d = other - at;
    let step = Point::new(
        BUS_ENTRY_SIZE * d.x.signum(),
        BUS_ENTRY_SIZE * d.y.signum(),
    );
    let new_end = at + step;

    let horizontal = d.y == 0 && d.x != 0;
    let vertical = d.x == 0 && d.y != 0;
    let perpendicular = (horizontal && bus.is_vertical()) || (vertical && bus.is_horizontal());

    if perpendicular {
        let probe = bus_probes(bus, end, d)?
            .into_iter()
            .map(|offset| at + offset)
            .find(|p| segment_hit(*p, bus.start, bus.end, 0))?;
        Some((BusEntry::between(probe, new_end), new_end))
    } else if d.x != 0 && d.y != 0 {
        Some((BusEntry::between(at, new_end), new_end))
    } else {
        None
    }
}

fn move_labels(screen: &mut Screen, old: &Line, new: Option<&Line>, to: Point) {
    for item in &mut screen.items {
        let SchItem::Label(label) = item else {
            continue;
        };
        let p = label.position;
        let on_old = segment_hit(p, old.start, old.end, 0);
        let on_new = new.is_some_and(|n| segment_hit(p, n.start, n.end, 0));
        if on_old && !on_new {
            label.position = to;
        }
    }
}

/// Insert bus entries where wires end on busses.
///
/// Wire ends that cannot be joined get a marker. Returns the positions of the
/// markers added. Running it again on the result changes nothing.
pub fn add_bus_entries(screen: &mut Screen) -> Vec<Point> {
    let busses: Vec<Line> = screen.lines(LineLayer::Bus).cloned().collect();
    let mut markers = Vec::new();

    for bus in &busses {
        let mut i = 0;
        'items: while i < screen.items.len() {
            for end in [WireEnd::Start, WireEnd::End] {
                let line = match &screen.items[i] {
                    SchItem::Line(line) if line.layer == LineLayer::Wire => line.clone(),
                    _ => break,
                };
                let (at, other) = end.points(&line);
                if !segment_hit(at, bus.start, bus.end, 0) {
                    continue;
                }

                let Some((entry, new_end)) = plan_entry(bus, end, at, other) else {
                    if !screen.markers().any(|m| m.position == at) {
                        screen.push(SchItem::Marker(Marker {
                            position: at,
                            message: BUS_ENTRY_NEEDED.to_string(),
                        }));
                        markers.push(at);
                    }
                    continue;
                };

                screen.push(SchItem::BusEntry(entry));

                // The entry covers the whole wire
                let d = other - at;
                if d.x.abs() <= BUS_ENTRY_SIZE && d.y.abs() <= BUS_ENTRY_SIZE {
                    screen.items.remove(i);
                    move_labels(screen, &line, None, new_end);
                    continue 'items;
                }

                let mut shortened = line.clone();
                end.set(&mut shortened, new_end);
                move_labels(screen, &line, Some(&shortened), new_end);
                screen.items[i] = SchItem::Line(shortened);
            }
            i += 1;
        }
    }

    markers
}
