//! Easing curves and interpolation helpers.
//!
//! Names follow the usual timeline-library vocabulary (`power2.out` etc.) so
//! that config files read the way motion designers write them.

/// An easing curve mapping normalised progress `t ∈ [0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power1In,
    Power1Out,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power3InOut,
    /// Hermite `3t² − 2t³`.
    Smoothstep,
}

impl Ease {
    /// Apply the curve.  Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power1In => power_in(t, 2),
            Self::Power1Out => power_out(t, 2),
            Self::Power1InOut => power_in_out(t, 2),
            Self::Power2In => power_in(t, 3),
            Self::Power2Out => power_out(t, 3),
            Self::Power2InOut => power_in_out(t, 3),
            Self::Power3In => power_in(t, 4),
            Self::Power3Out => power_out(t, 4),
            Self::Power3InOut => power_in_out(t, 4),
            Self::Smoothstep => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Parse a config name such as `"power2.out"` or `"linear"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "linear" | "none" => Some(Self::Linear),
            "power1.in" => Some(Self::Power1In),
            "power1.out" | "power1" => Some(Self::Power1Out),
            "power1.inout" => Some(Self::Power1InOut),
            "power2.in" => Some(Self::Power2In),
            "power2.out" | "power2" => Some(Self::Power2Out),
            "power2.inout" => Some(Self::Power2InOut),
            "power3.in" => Some(Self::Power3In),
            "power3.out" | "power3" => Some(Self::Power3Out),
            "power3.inout" => Some(Self::Power3InOut),
            "smoothstep" => Some(Self::Smoothstep),
            _ => None,
        }
    }

    /// Config-file name, the inverse of [`Ease::parse`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Power1In => "power1.in",
            Self::Power1Out => "power1.out",
            Self::Power1InOut => "power1.inOut",
            Self::Power2In => "power2.in",
            Self::Power2Out => "power2.out",
            Self::Power2InOut => "power2.inOut",
            Self::Power3In => "power3.in",
            Self::Power3Out => "power3.out",
            Self::Power3InOut => "power3.inOut",
            Self::Smoothstep => "smoothstep",
        }
    }
}

fn power_in(t: f64, exp: i32) -> f64 {
    t.powi(exp)
}

fn power_out(t: f64, exp: i32) -> f64 {
    1.0 - (1.0 - t).powi(exp)
}

fn power_in_out(t: f64, exp: i32) -> f64 {
    if t < 0.5 {
        power_in(t * 2.0, exp) / 2.0
    } else {
        1.0 - power_in((1.0 - t) * 2.0, exp) / 2.0
    }
}

/// Linear interpolation from `a` to `b` by `t` (not clamped).
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[Ease] = &[
        Ease::Linear,
        Ease::Power1In,
        Ease::Power1Out,
        Ease::Power1InOut,
        Ease::Power2In,
        Ease::Power2Out,
        Ease::Power2InOut,
        Ease::Power3In,
        Ease::Power3Out,
        Ease::Power3InOut,
        Ease::Smoothstep,
    ];

    #[test]
    fn curves_hit_endpoints() {
        for &ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Ease::Power2Out.apply(-3.0), 0.0);
        assert_eq!(Ease::Power2Out.apply(7.0), 1.0);
    }

    #[test]
    fn power2_out_is_cubic_ease_out() {
        // 1 - (1 - 0.5)^3
        assert!((Ease::Power2Out.apply(0.5) - 0.875).abs() < 1e-12);
        assert!(Ease::Power2Out.apply(0.5) > Ease::Linear.apply(0.5));
    }

    #[test]
    fn in_out_is_symmetric_at_midpoint() {
        assert!((Ease::Power1InOut.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((Ease::Power3InOut.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn names_parse_back() {
        for &ease in ALL {
            assert_eq!(Ease::parse(ease.name()), Some(ease));
        }
        assert_eq!(Ease::parse("bounce"), None);
    }

    #[test]
    fn lerp_midpoint() {
        assert_eq!(lerp(0.0, 100.0, 0.5), 50.0);
        assert_eq!(lerp(10.0, 10.0, 0.9), 10.0);
    }
}
