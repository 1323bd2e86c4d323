//! Text size and anchoring conversion.

use eagle_xml::{Align, EText, TextFont};
use sch_model::{HJustify, TextEffects, VJustify};

use crate::units::{EAGLE_TO_NATIVE, to_native_length};

/// Ratio above which EAGLE text is drawn bold.
const BOLD_RATIO: f64 = 12.0;

/// Native glyph size (width, height) for an EAGLE text size and font.
pub fn convert_size(size: f64, font: Option<TextFont>) -> (i32, i32) {
    let scaled = |v: f64| (v * EAGLE_TO_NATIVE).round() as i32;
    match font {
        None => (scaled(size * 0.85), to_native_length(size)),
        Some(TextFont::Fixed) => (to_native_length(size), scaled(size * 0.8)),
        Some(TextFont::Vector) | Some(TextFont::Proportional) => {
            let s = to_native_length(size);
            (s, s)
        }
    }
}

fn justify(align: Align) -> (HJustify, VJustify) {
    match align {
        Align::Center => (HJustify::Center, VJustify::Center),
        Align::CenterLeft => (HJustify::Left, VJustify::Center),
        Align::CenterRight => (HJustify::Right, VJustify::Center),
        Align::TopCenter => (HJustify::Center, VJustify::Top),
        Align::TopLeft => (HJustify::Left, VJustify::Top),
        Align::TopRight => (HJustify::Right, VJustify::Top),
        Align::BottomCenter => (HJustify::Center, VJustify::Bottom),
        Align::BottomLeft => (HJustify::Left, VJustify::Bottom),
        Align::BottomRight => (HJustify::Right, VJustify::Bottom),
    }
}

/// Apply EAGLE alignment and rotation to `effects`.
///
/// `rel_degrees` is the text rotation relative to its parent instance,
/// `abs_degrees` its rotation on the sheet. Angles other than quarter turns
/// leave the angle untouched.
pub fn apply_alignment(
    effects: &mut TextEffects,
    align: Align,
    rel_degrees: i32,
    mirror: bool,
    spin: bool,
    abs_degrees: i32,
) {
    let mut align = align;

    match rel_degrees {
        90 => effects.angle = 90.0,
        180 if spin => effects.angle = 180.0,
        180 => align = align.opposite(),
        270 if spin => effects.angle = 270.0,
        270 => {
            effects.angle = 90.0;
            align = align.opposite();
        }
        _ => {}
    }

    if mirror {
        align = match abs_degrees {
            90 | 270 => match align {
                Align::BottomRight => Align::TopRight,
                Align::BottomLeft => Align::TopLeft,
                Align::TopLeft => Align::BottomLeft,
                Align::TopRight => Align::BottomRight,
                other => other,
            },
            0 | 180 => match align {
                Align::BottomRight => Align::BottomLeft,
                Align::BottomLeft => Align::BottomRight,
                Align::TopLeft => Align::TopRight,
                Align::TopRight => Align::TopLeft,
                Align::CenterLeft => Align::CenterRight,
                Align::CenterRight => Align::CenterLeft,
                other => other,
            },
            _ => align,
        };
    }

    (effects.hjustify, effects.vjustify) = justify(align);
}

/// Whole degrees in `0..360`.
pub fn whole_degrees(degrees: f64) -> i32 {
    (degrees.round() as i32).rem_euclid(360)
}

/// Effects for free-standing text, in a symbol or on a sheet.
pub fn text_effects(text: &EText) -> TextEffects {
    let (width, height) = convert_size(text.size, text.font);
    let mut effects = TextEffects {
        bold: text.ratio > BOLD_RATIO,
        angle: 0.0,
        ..TextEffects::with_size(width, height)
    };
    apply_alignment(
        &mut effects,
        text.align,
        whole_degrees(text.rot.degrees),
        text.rot.mirror,
        text.rot.spin,
        0,
    );
    effects
}
