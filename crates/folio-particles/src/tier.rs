//! Density tiers selected by surface width.

/// Surfaces narrower than this use [`Tier::COMPACT`].
pub const WIDTH_BREAKPOINT: u32 = 768;

/// Particle count and connection distance for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    /// Number of particles in the field.
    pub count: usize,
    /// Pairs strictly closer than this (in pixels) are connected.
    pub connection_distance: f64,
}

impl Tier {
    /// Narrow surfaces: fewer particles, shorter connections.
    pub const COMPACT: Tier = Tier {
        count: 25,
        connection_distance: 80.0,
    };

    pub const WIDE: Tier = Tier {
        count: 80,
        connection_distance: 160.0,
    };

    /// Select the tier for a surface width. There is no hysteresis band.
    pub fn for_width(width: u32) -> Tier {
        if width < WIDTH_BREAKPOINT {
            Tier::COMPACT
        } else {
            Tier::WIDE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_tier_scenarios() {
        assert_eq!(Tier::for_width(400), Tier::COMPACT);
        assert_eq!(Tier::for_width(400).count, 25);
        assert_eq!(Tier::for_width(400).connection_distance, 80.0);

        assert_eq!(Tier::for_width(1200), Tier::WIDE);
        assert_eq!(Tier::for_width(1200).count, 80);
        assert_eq!(Tier::for_width(1200).connection_distance, 160.0);
    }

    #[test]
    fn test_tier_boundary() {
        assert_eq!(Tier::for_width(0), Tier::COMPACT);
        assert_eq!(Tier::for_width(767), Tier::COMPACT);
        assert_eq!(Tier::for_width(768), Tier::WIDE);
    }

    #[quickcheck]
    fn prop_tier_is_one_of_two(width: u32) -> bool {
        let tier = Tier::for_width(width);
        if width < 768 {
            tier == Tier::COMPACT
        } else {
            tier == Tier::WIDE
        }
    }
}
