//! A single drifting point.

use folio_core::SurfaceSize;
use rand::Rng;

/// Largest absolute velocity component, in pixels per frame.
const MAX_SPEED: f64 = 0.2;

/// Radius range of a particle, in pixels.
const MIN_RADIUS: f64 = 1.0;
const MAX_RADIUS: f64 = 3.0;

/// A point with constant velocity and fixed radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Radius in pixels.
    pub size: f64,
}

impl Particle {
    /// Place a particle uniformly at random on the surface.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, surface: SurfaceSize) -> Self {
        Self {
            x: random_coord(rng, surface.width),
            y: random_coord(rng, surface.height),
            vx: rng.random_range(-MAX_SPEED..MAX_SPEED),
            vy: rng.random_range(-MAX_SPEED..MAX_SPEED),
            size: rng.random_range(MIN_RADIUS..MAX_RADIUS),
        }
    }

    /// Move by one frame of velocity, wrapping around the surface edges.
    pub fn advance(&mut self, surface: SurfaceSize) {
        self.x = wrap(self.x + self.vx, surface.width);
        self.y = wrap(self.y + self.vy, surface.height);
    }

    /// Euclidean distance to another particle.
    pub fn distance(&self, other: &Particle) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

fn random_coord<R: Rng + ?Sized>(rng: &mut R, extent: u32) -> f64 {
    if extent == 0 {
        0.0
    } else {
        rng.random_range(0.0..f64::from(extent))
    }
}

/// Toroidal wrap into `[0, extent)`. A zero extent pins the value to 0.
fn wrap(value: f64, extent: u32) -> f64 {
    let extent = f64::from(extent);
    if extent <= 0.0 {
        return 0.0;
    }
    // Leaving through the near edge re-enters from the far one.
    let value = if value < 0.0 {
        value.rem_euclid(extent)
    } else {
        value
    };
    if value >= extent { 0.0 } else { value }
}
