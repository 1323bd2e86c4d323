use std::collections::HashMap;

use eagle_xml::{ELayer, EPart, Record, elements_named};
use roxmltree::Node;
use sch_model::{LineLayer, PartLibrary};

use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::library::EagleLibrary;

/// State shared by every step of one import.
#[derive(Debug)]
pub struct ImportSession {
    /// EAGLE layer number to native line layer
    pub layers: HashMap<i32, LineLayer>,
    /// `<parts>` by part name
    pub parts: HashMap<String, EPart>,
    /// Per foreign library: part names and gate units
    pub libraries: HashMap<String, EagleLibrary>,
    /// Net name to the number of sheets it appears on
    pub net_counts: HashMap<String, usize>,
    /// Every converted part
    pub library: PartLibrary,
    diagnostics: Vec<Diagnostic>,
    stamp: u32,
}

impl ImportSession {
    pub fn new(library_name: impl Into<String>, stamp_seed: u32) -> Self {
        Self {
            layers: HashMap::new(),
            parts: HashMap::new(),
            libraries: HashMap::new(),
            net_counts: HashMap::new(),
            library: PartLibrary::new(library_name),
            diagnostics: Vec::new(),
            stamp: stamp_seed,
        }
    }

    /// Layer for a wire on EAGLE layer `number`. Unmapped layers become notes.
    pub fn line_layer(&self, number: i32) -> LineLayer {
        self.layers
            .get(&number)
            .copied()
            .unwrap_or(LineLayer::Notes)
    }

    pub fn net_count(&self, net: &str) -> usize {
        self.net_counts.get(net).copied().unwrap_or_default()
    }

    /// Take the next identity stamp.
    pub fn next_stamp(&mut self) -> u32 {
        let stamp = self.stamp;
        self.stamp = self.stamp.wrapping_add(1);
        stamp
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (PartLibrary, Vec<Diagnostic>) {
        (self.library, self.diagnostics)
    }
}

/// Build the layer map from `<layers>`.
pub fn load_layers(session: &mut ImportSession, layers: Node) -> Result<()> {
    for node in elements_named(layers, ELayer::TAG) {
        let layer = ELayer::from_node(&node)?;
        let mapped = match layer.name.as_str() {
            "Nets" => LineLayer::Wire,
            "Busses" => LineLayer::Bus,
            "Info" | "Guide" => LineLayer::Notes,
            _ => continue,
        };
        session.layers.insert(layer.number, mapped);
    }
    Ok(())
}

/// Index `<parts>` by name.
pub fn load_parts(session: &mut ImportSession, parts: Node) -> Result<()> {
    for node in elements_named(parts, EPart::TAG) {
        let part = EPart::from_node(&node)?;
        session.parts.insert(part.name.clone(), part);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;
    use sch_model::Point;

    #[test]
    fn test_layer_map() {
        let xml = r#"<layers>
            <layer number="91" name="Nets" color="2" fill="1" visible="yes" active="yes"/>
            <layer number="92" name="Busses" color="1" fill="1" visible="yes" active="yes"/>
            <layer number="97" name="Info" color="7" fill="1" visible="yes" active="yes"/>
            <layer number="94" name="Symbols" color="4" fill="1" visible="yes" active="yes"/>
        </layers>"#;
        let doc = Document::parse(xml).unwrap();
        let mut session = ImportSession::new("test", 0);
        load_layers(&mut session, doc.root_element()).unwrap();

        assert_eq!(session.line_layer(91), LineLayer::Wire);
        assert_eq!(session.line_layer(92), LineLayer::Bus);
        assert_eq!(session.line_layer(97), LineLayer::Notes);
        assert_eq!(session.line_layer(94), LineLayer::Notes);
        assert_eq!(session.line_layer(200), LineLayer::Notes);
    }

    #[test]
    fn test_stamps_increase() {
        let mut session = ImportSession::new("test", u32::MAX);
        assert_eq!(session.next_stamp(), u32::MAX);
        assert_eq!(session.next_stamp(), 0);
    }

    #[test]
    fn test_report_collects() {
        let mut session = ImportSession::new("test", 0);
        session.report(Diagnostic::BusEntryNeeded {
            sheet: "s".into(),
            position: Point::new(1, 2),
        });
        assert_eq!(session.diagnostics().len(), 1);
        let (library, diagnostics) = session.into_parts();
        assert!(library.is_empty());
        assert_eq!(diagnostics.len(), 1);
    }
}
