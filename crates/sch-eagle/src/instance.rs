use eagle_xml::{Align, AttrDisplay, EAttr, EInstance};
use sch_model::{Component, Field, FieldId, Orientation, SchItem, Screen, SheetReference};
use uuid::Uuid;

use crate::diagnostic::Diagnostic;
use crate::session::ImportSession;
use crate::text::{apply_alignment, convert_size, whole_degrees};
use crate::units::to_native_point;

const UUID_NAMESPACE_URL: Uuid = Uuid::from_u128(0x6ba7b811_9dad_11d1_80b4_00c04fd430c8);

/// Ratio above which attribute text is drawn bold.
const BOLD_RATIO: f64 = 12.0;

/// Stable identity of a placed unit.
pub fn component_uuid(part: &str, value: &str, unit: u32) -> Uuid {
    let key = format!("{part}/{value}/{unit}");
    Uuid::new_v5(&UUID_NAMESPACE_URL, key.as_bytes())
}

struct Resolved {
    part_name: String,
    unit: u32,
    package: Option<String>,
    value: Option<String>,
    fields: Vec<Field>,
}

fn resolve(session: &ImportSession, instance: &EInstance) -> Result<Resolved, String> {
    let part = session
        .parts
        .get(&instance.part)
        .ok_or_else(|| "part is not declared".to_string())?;
    let library = session
        .libraries
        .get(&part.library)
        .ok_or_else(|| format!("library {} is not loaded", part.library))?;
    let part_name = library
        .part_name(&part.deviceset, &part.device)
        .ok_or_else(|| {
            format!(
                "device {}{} not found in library {}",
                part.deviceset, part.device, part.library
            )
        })?;
    let unit = library
        .gate_unit(&part.deviceset, &part.device, &instance.gate)
        .ok_or_else(|| format!("gate {} not found in {}", instance.gate, part_name))?;
    let lib_part = session
        .library
        .get(part_name)
        .ok_or_else(|| format!("part {part_name} was not converted"))?;

    Ok(Resolved {
        part_name: part_name.to_string(),
        unit,
        package: library.package(part_name).map(str::to_string),
        value: part.value.clone(),
        fields: lib_part.fields.clone(),
    })
}

/// Apply a placed `NAME`/`VALUE` attribute to a component field.
fn apply_attribute(field: &mut Field, attr: &EAttr, instance_degrees: i32, instance_mirror: bool) {
    if let Some((x, y)) = attr.position() {
        field.position = to_native_point(x, y);
    }
    if let Some(size) = attr.size {
        let (width, height) = convert_size(size, attr.font);
        field.effects.width = width;
        field.effects.height = height;
    }
    if let Some(ratio) = attr.ratio {
        field.effects.bold = ratio > BOLD_RATIO;
    }

    let rot = attr.rot.unwrap_or_default();
    let abs_degrees = whole_degrees(rot.degrees);
    let rel_degrees = (abs_degrees - instance_degrees + 360) % 360;

    apply_alignment(
        &mut field.effects,
        attr.align.unwrap_or(Align::BottomLeft),
        rel_degrees,
        rot.mirror ^ instance_mirror,
        rot.spin,
        abs_degrees,
    );
    field.effects.visible = attr.display != AttrDisplay::Off;
}

/// Place one gate instance on `screen`.
///
/// Instances that do not resolve to a converted part are reported and
/// skipped.
pub fn load_instance(
    session: &mut ImportSession,
    screen: &mut Screen,
    sheet_name: &str,
    sheet_path: &str,
    instance: &EInstance,
) {
    let resolved = match resolve(session, instance) {
        Ok(resolved) => resolved,
        Err(reason) => {
            session.report(Diagnostic::UnresolvedPart {
                sheet: sheet_name.to_string(),
                part: instance.part.clone(),
                reason,
            });
            return;
        }
    };

    let position = to_native_point(instance.x, instance.y);
    let rot = instance.rot.unwrap_or_default();
    let instance_degrees = whole_degrees(rot.degrees);

    let mut component = Component {
        part: resolved.part_name.clone(),
        unit: resolved.unit,
        position,
        orientation: Orientation::from_degrees(rot.degrees),
        mirror: rot.mirror,
        uuid: component_uuid(
            &instance.part,
            resolved.value.as_deref().unwrap_or_default(),
            resolved.unit,
        ),
        fields: resolved
            .fields
            .into_iter()
            .map(|mut f| {
                f.position += position;
                f
            })
            .collect(),
        references: Vec::new(),
    };

    let texts = [
        (FieldId::Reference, instance.part.clone()),
        (
            FieldId::Value,
            resolved.value.unwrap_or(resolved.part_name),
        ),
        (FieldId::Footprint, resolved.package.unwrap_or_default()),
    ];
    for (id, text) in texts {
        match component.field_mut(id) {
            Some(field) => field.text = text,
            None => component.fields.push(Field {
                position,
                ..Field::new(id, text)
            }),
        }
    }

    for (attr_name, id) in [("NAME", FieldId::Reference), ("VALUE", FieldId::Value)] {
        let Some(field) = component.field_mut(id) else {
            continue;
        };
        match instance.attribute(attr_name) {
            Some(attr) => apply_attribute(field, attr, instance_degrees, rot.mirror),
            None if instance.smashed => field.effects.visible = false,
            None => {}
        }
    }

    component.references.push(SheetReference {
        path: format!("{sheet_path}{}", component.uuid),
        reference: instance.part.clone(),
        unit: component.unit,
    });

    log::trace!(
        "Placed {} unit {} at {}",
        component.reference(),
        component.unit,
        component.position
    );
    screen.push(SchItem::Component(component));
}
