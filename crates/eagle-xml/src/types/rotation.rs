use std::str::FromStr;

/// EAGLE rotation, written as `[S][M]R<degrees>`
///
/// `S` is the spin flag (text may be shown upside down), `M` mirrors the
/// element about the Y axis before rotating.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ERot {
    pub degrees: f64,
    pub mirror: bool,
    pub spin: bool,
}

impl ERot {
    pub fn new(degrees: f64) -> Self {
        Self {
            degrees,
            ..Self::default()
        }
    }

    /// Degrees normalised into `0..360`.
    pub fn normalized(&self) -> f64 {
        self.degrees.rem_euclid(360.0)
    }
}

impl FromStr for ERot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rot = ERot::default();
        let mut rest = s.trim();

        loop {
            if let Some(r) = rest.strip_prefix('S') {
                rot.spin = true;
                rest = r;
            } else if let Some(r) = rest.strip_prefix('M') {
                rot.mirror = true;
                rest = r;
            } else {
                break;
            }
        }

        let degrees = rest
            .strip_prefix('R')
            .ok_or_else(|| format!("Unknown rotation: {}", s))?;
        rot.degrees = degrees
            .parse()
            .map_err(|_| format!("Unknown rotation: {}", s))?;

        Ok(rot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rotation() {
        let rot: ERot = "R90".parse().unwrap();
        assert_eq!(rot, ERot::new(90.0));
    }

    #[test]
    fn spin_and_mirror_flags() {
        let rot: ERot = "SMR270".parse().unwrap();
        assert_eq!(rot.degrees, 270.0);
        assert!(rot.mirror);
        assert!(rot.spin);

        let rot: ERot = "MR180".parse().unwrap();
        assert!(rot.mirror);
        assert!(!rot.spin);
    }

    #[test]
    fn fractional_degrees() {
        let rot: ERot = "R22.5".parse().unwrap();
        assert_eq!(rot.degrees, 22.5);
    }

    #[test]
    fn rejects_garbage() {
        assert!("90".parse::<ERot>().is_err());
        assert!("Rx".parse::<ERot>().is_err());
        assert!("".parse::<ERot>().is_err());
    }

    #[test]
    fn normalizes_negative_angles() {
        assert_eq!(ERot::new(-90.0).normalized(), 270.0);
        assert_eq!(ERot::new(450.0).normalized(), 90.0);
    }
}
