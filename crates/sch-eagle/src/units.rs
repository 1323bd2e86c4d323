use sch_model::Point;

/// EAGLE millimetres to schematic mils.
pub const EAGLE_TO_NATIVE: f64 = 1000.0 / 25.4;

pub fn to_native_length(mm: f64) -> i32 {
    (mm * EAGLE_TO_NATIVE).round() as i32
}

/// EAGLE's Y axis points up, the native one points down.
pub fn to_native_y(mm: f64) -> i32 {
    -to_native_length(mm)
}

pub fn from_native_length(mils: i32) -> f64 {
    f64::from(mils) / EAGLE_TO_NATIVE
}

pub fn to_native_point(x: f64, y: f64) -> Point {
    Point::new(to_native_length(x), to_native_y(y))
}

/// Centre of a circular arc through `start` and `end` sweeping `curve`
/// degrees counter-clockwise as seen on the page.
///
/// Inputs are native (Y-down) coordinates.
pub fn arc_centre(start: (f64, f64), end: (f64, f64), curve: f64) -> (f64, f64) {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let mid = ((start.0 + end.0) / 2.0, (start.1 + end.1) / 2.0);

    let dlen = dx.hypot(dy);
    if dlen == 0.0 {
        return start;
    }
    let dist = dlen / (2.0 * (curve.to_radians() / 2.0).tan());

    (mid.0 + dist * dy / dlen, mid.1 - dist * dx / dlen)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_y_is_negated() {
        assert_eq!(to_native_point(2.54, 2.54), Point::new(100, -100));
        assert_eq!(to_native_point(-2.54, -5.08), Point::new(-100, 200));
    }

    #[test]
    fn test_scale_round_trip() {
        for mm in [0.0, 2.54, 25.4, -12.7, 101.6] {
            let back = from_native_length(to_native_length(mm));
            assert!((back - mm).abs() < 0.0254, "{mm} came back as {back}");
        }
        assert_eq!(to_native_length(25.4), 1000);
    }

    #[test]
    fn test_arc_centre_quarter_turn() {
        // (1,0) to (0,1) counter-clockwise in EAGLE, i.e. (1,0) to (0,-1) on the page
        let c = arc_centre((1.0, 0.0), (0.0, -1.0), 90.0);
        assert!(close(c, (0.0, 0.0)), "{c:?}");

        let c = arc_centre((0.0, -1.0), (1.0, 0.0), -90.0);
        assert!(close(c, (0.0, 0.0)), "{c:?}");
    }

    #[test]
    fn test_arc_centre_half_turn() {
        let c = arc_centre((-100.0, 0.0), (100.0, 0.0), 180.0);
        assert!(close(c, (0.0, 0.0)), "{c:?}");
    }
}
