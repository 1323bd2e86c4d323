//! Sheet assembly: the per-sheet load order, page sizing and hierarchy.

use eagle_xml::{
    EBus, EInstance, ENet, EText, EWire, ElementKind, Record, elements, elements_named,
    map_children,
};
use roxmltree::{Document, Node};
use sch_model::{
    PageInfo, PartLibrary, Point, ROOT_SHEET_PATH, SchItem, Screen, Sheet, Text, sheet_path,
};

use crate::bus_entry::add_bus_entries;
use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::instance::load_instance;
use crate::library::load_library;
use crate::nets::{count_nets, escape_name, load_segments, load_wire};
use crate::session::{ImportSession, load_layers, load_parts};
use crate::text::text_effects;
use crate::units::to_native_point;

/// Margin added around the drawing when the page has to grow.
const PAGE_MARGIN: i32 = 1500;

/// Grid the recentring translation snaps to.
const PLACEMENT_GRID: i32 = 100;

/// Sheet symbols are laid out on the root page in columns up to this index.
const SHEET_COLUMNS: i32 = 10;

/// Placeholder for empty plain text.
const EMPTY_TEXT: &str = "\" \"";

const ILLEGAL_FILE_NAME_CHARS: &str = "\\/:\"<>|";

/// Percent-encode characters not allowed in file names and replace spaces.
pub fn encode_file_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for c in name.chars() {
        if ILLEGAL_FILE_NAME_CHARS.contains(c) {
            encoded.push_str(&format!("%{:02x}", c as u32));
        } else if c == ' ' {
            encoded.push('_');
        } else {
            encoded.push(c);
        }
    }
    encoded
}

/// Display name and file name of a sheet.
///
/// The sheet's `<description>` names it; undescribed sheets are named after
/// the file and their index.
pub fn sheet_names(sheet: Node, stem: &str, index: usize) -> (String, String) {
    let name = map_children(sheet)
        .get("description")
        .and_then(|d| d.text())
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{stem}_{index}"));
    let file_name = format!("{}.sch", encode_file_name(&name));
    (name, file_name)
}

/// Centre the drawing on its page, growing the page to fit.
///
/// Returns the applied translation, `None` for an empty screen.
pub fn recentre(screen: &mut Screen, library: &PartLibrary) -> Option<Point> {
    let bbox = screen.bounding_box(library)?;

    let target_width = bbox.width() + PAGE_MARGIN;
    let target_height = bbox.height() + PAGE_MARGIN;
    if screen.page.width < target_width {
        screen.page.width = target_width;
    }
    if screen.page.height < target_height {
        screen.page.height = target_height;
    }

    let offset = screen.page.centre() - bbox.centre();
    let offset = Point::new(
        offset.x.div_euclid(PLACEMENT_GRID) * PLACEMENT_GRID,
        offset.y.div_euclid(PLACEMENT_GRID) * PLACEMENT_GRID,
    );
    screen.translate(offset);
    Some(offset)
}

fn load_plain(session: &ImportSession, screen: &mut Screen, plain: Node) -> Result<()> {
    for child in elements(plain) {
        match ElementKind::of(&child) {
            Some(ElementKind::Text) => {
                let text = EText::from_node(&child)?;
                let content = if text.text.is_empty() {
                    EMPTY_TEXT.to_string()
                } else {
                    escape_name(&text.text)
                };
                screen.push(SchItem::Text(Text {
                    text: content,
                    position: to_native_point(text.x, text.y),
                    effects: text_effects(&text),
                }));
            }
            Some(ElementKind::Wire) => {
                let wire = EWire::from_node(&child)?;
                screen.push(SchItem::Line(load_wire(session, &wire)));
            }
            _ => log::trace!("Skipping plain <{}>", child.tag_name().name()),
        }
    }
    Ok(())
}

/// Load one `<sheet>` onto `screen`.
pub fn load_sheet(
    session: &mut ImportSession,
    screen: &mut Screen,
    sheet: Node,
    name: &str,
    path: &str,
) -> Result<()> {
    let children = map_children(sheet);

    if let Some(busses) = children.get("busses") {
        for node in elements_named(busses, EBus::TAG) {
            let bus = EBus::from_node(&node)?;
            load_segments(session, screen, &bus.name, node)?;
        }
    }

    if let Some(nets) = children.get("nets") {
        for node in elements_named(nets, ENet::TAG) {
            let net = ENet::from_node(&node)?;
            load_segments(session, screen, &net.name, node)?;
        }
    }

    let markers = add_bus_entries(screen);

    if let Some(instances) = children.get("instances") {
        for node in elements_named(instances, EInstance::TAG) {
            let instance = EInstance::from_node(&node)?;
            load_instance(session, screen, name, path, &instance);
        }
    }

    if let Some(plain) = children.get("plain") {
        load_plain(session, screen, plain)?;
    }

    let offset = recentre(screen, &session.library).unwrap_or_default();
    for position in markers {
        session.report(Diagnostic::BusEntryNeeded {
            sheet: name.to_string(),
            position: position + offset,
        });
    }

    log::debug!("Loaded sheet {} with {} items", name, screen.items.len());
    Ok(())
}

/// Grid position of the `index`th (0-based) sheet symbol on the root page.
fn sheet_symbol_position(index: usize) -> Point {
    let mut x = 1;
    let mut y = 1;
    for _ in 0..index {
        x += 2;
        if x > SHEET_COLUMNS {
            x = 1;
            y += 2;
        }
    }
    Point::new(x * 1000, y * 1000)
}

/// Convert a parsed EAGLE document into a root screen.
///
/// `stem` names undescribed sheets. Libraries and parts are loaded into
/// `session` before any sheet; a file with several sheets gets one child
/// sheet per EAGLE sheet.
pub fn load_schematic(
    session: &mut ImportSession,
    doc: &Document,
    stem: &str,
    page: PageInfo,
) -> Result<Screen> {
    let eagle = map_children(doc.root_element());
    let drawing = map_children(eagle.require("drawing")?);

    if let Some(layers) = drawing.get("layers") {
        load_layers(session, layers)?;
    }

    let schematic = map_children(drawing.require("schematic")?);

    if let Some(libraries) = schematic.get("libraries") {
        for library in elements_named(libraries, "library") {
            load_library(session, library)?;
        }
    }
    if let Some(parts) = schematic.get("parts") {
        load_parts(session, parts)?;
    }

    let sheets: Vec<Node> = match schematic.get("sheets") {
        Some(sheets) => {
            count_nets(session, sheets)?;
            elements_named(sheets, "sheet").collect()
        }
        None => Vec::new(),
    };

    let mut root = Screen::new(format!("{stem}.sch"), page);

    match sheets.as_slice() {
        [] => log::debug!("{stem} has no sheets"),
        [sheet] => {
            let (name, file_name) = sheet_names(*sheet, stem, 0);
            root.file_name = file_name;
            load_sheet(session, &mut root, *sheet, &name, ROOT_SHEET_PATH)?;
        }
        sheets => {
            let base = session.next_stamp();
            for (index, sheet) in sheets.iter().enumerate() {
                let number = index + 1;
                let stamp = base.wrapping_sub(number as u32);
                let (name, file_name) = sheet_names(*sheet, stem, number);

                let mut screen = Screen::new(&file_name, page);
                load_sheet(session, &mut screen, *sheet, &name, &sheet_path(stamp))?;

                root.push(SchItem::Sheet(Box::new(Sheet {
                    name,
                    file_name,
                    position: sheet_symbol_position(index),
                    size: Sheet::DEFAULT_SIZE,
                    stamp,
                    screen,
                })));
            }
        }
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sch_model::{Junction, Line, LineLayer};

    #[test]
    fn test_encode_file_name() {
        assert_eq!(encode_file_name("Power Supply"), "Power_Supply");
        assert_eq!(encode_file_name("a/b:c"), "a%2fb%3ac");
        assert_eq!(encode_file_name("<x>|\"\\"), "%3cx%3e%7c%22%5c");
    }

    #[test]
    fn test_sheet_names() {
        let doc = roxmltree::Document::parse(
            r#"<sheets>
                <sheet><description>Power / IO</description></sheet>
                <sheet><description>  </description></sheet>
                <sheet/>
            </sheets>"#,
        )
        .unwrap();
        let sheets: Vec<Node> = elements_named(doc.root_element(), "sheet").collect();

        assert_eq!(
            sheet_names(sheets[0], "board", 1),
            ("Power / IO".to_string(), "Power_%2f_IO.sch".to_string())
        );
        assert_eq!(
            sheet_names(sheets[1], "board", 2),
            ("board_2".to_string(), "board_2.sch".to_string())
        );
        assert_eq!(sheet_names(sheets[2], "my board", 3).1, "my_board_3.sch");
    }

    #[test]
    fn test_sheet_symbol_grid() {
        let positions: Vec<Point> = (0..7).map(sheet_symbol_position).collect();
        assert_eq!(positions[0], Point::new(1000, 1000));
        assert_eq!(positions[1], Point::new(3000, 1000));
        assert_eq!(positions[4], Point::new(9000, 1000));
        assert_eq!(positions[5], Point::new(1000, 3000));
        assert_eq!(positions[6], Point::new(3000, 3000));
    }

    #[test]
    fn test_recentre_snaps_to_grid() {
        let library = PartLibrary::default();
        let mut screen = Screen::new("a.sch", PageInfo::A4);
        screen.push(SchItem::Line(Line::new(
            LineLayer::Wire,
            Point::new(-130, -70),
            Point::new(70, 30),
        )));

        let offset = recentre(&mut screen, &library).unwrap();
        // page centre (5846, 4134) minus bbox centre (-30, -20)
        assert_eq!(offset, Point::new(5800, 4100));
        assert_eq!(screen.page, PageInfo::A4);

        let centre = screen.bounding_box(&library).unwrap().centre();
        let page_centre = screen.page.centre();
        assert!((centre.x - page_centre.x).abs() <= PLACEMENT_GRID);
        assert!((centre.y - page_centre.y).abs() <= PLACEMENT_GRID);
    }

    #[test]
    fn test_recentre_floors_negative_offsets() {
        let library = PartLibrary::default();
        let mut screen = Screen::new("a.sch", PageInfo::A4);
        screen.push(SchItem::Junction(Junction {
            position: Point::new(6000, 5000),
        }));
        let offset = recentre(&mut screen, &library).unwrap();
        // (-154, -866) floors away from zero
        assert_eq!(offset, Point::new(-200, -900));
    }

    #[test]
    fn test_recentre_grows_page() {
        let library = PartLibrary::default();
        let mut screen = Screen::new("a.sch", PageInfo::A4);
        screen.push(SchItem::Line(Line::new(
            LineLayer::Notes,
            Point::new(0, 0),
            Point::new(20000, 1000),
        )));
        recentre(&mut screen, &library).unwrap();
        assert_eq!(screen.page.width, 21500);
        assert_eq!(screen.page.height, PageInfo::A4.height);
    }

    #[test]
    fn test_empty_screen_is_not_moved() {
        let library = PartLibrary::default();
        let mut screen = Screen::new("a.sch", PageInfo::A4);
        assert_eq!(recentre(&mut screen, &library), None);
        assert_eq!(screen.page, PageInfo::A4);
    }
}
