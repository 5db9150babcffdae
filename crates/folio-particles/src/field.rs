//! Particle field state and the per-frame update.

use folio_core::{Rgba, SurfaceSize};
use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::particle::Particle;
use crate::surface::Surface;
use crate::tier::Tier;

/// Fill colour of particles.
pub const PARTICLE_COLOR: Rgba = Rgba::new(230, 240, 255, 0.6);

/// Stroke colour of connection lines.
pub const LINE_COLOR: Rgba = Rgba::new(230, 240, 255, 0.15);

/// Stroke width of connection lines.
pub const LINE_WIDTH: f64 = 1.0;

/// An animated network of particles sized to a container.
#[derive(Debug)]
pub struct ParticleField<R = StdRng> {
    /// Current surface dimensions.
    size: SurfaceSize,
    /// Density tier derived from the surface width.
    tier: Tier,
    /// Current generation of particles.
    particles: Vec<Particle>,
    rng: R,
}

impl ParticleField<StdRng> {
    /// Start a field inside `container`.
    ///
    /// Returns `None` without doing anything when there is no container.
    pub fn start(container: Option<SurfaceSize>) -> Option<Self> {
        let size = container?;
        Some(Self::with_rng(size, StdRng::from_os_rng()))
    }
}

impl<R: Rng> ParticleField<R> {
    /// Create a field drawing its randomness from `rng`.
    pub fn with_rng(size: SurfaceSize, rng: R) -> Self {
        let mut field = Self {
            size,
            tier: Tier::for_width(size.width),
            particles: Vec::new(),
            rng,
        };
        field.populate();
        field
    }

    /// Adopt a new surface size and replace every particle.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.populate();
    }

    fn populate(&mut self) {
        self.tier = Tier::for_width(self.size.width);
        let rng = &mut self.rng;
        let size = self.size;
        self.particles = (0..self.tier.count)
            .map(|_| Particle::random(&mut *rng, size))
            .collect();
        debug!(
            "particle field {}x{}: {} particles, connection distance {}",
            size.width, size.height, self.tier.count, self.tier.connection_distance
        );
    }

    /// Advance one frame and draw it onto `surface`.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear(self.size);

        for particle in &mut self.particles {
            particle.advance(self.size);
        }
        for particle in &self.particles {
            surface.fill_circle(particle.x, particle.y, particle.size, PARTICLE_COLOR);
        }
        for (i, j) in self.connections() {
            let (a, b) = (&self.particles[i], &self.particles[j]);
            surface.stroke_line((a.x, a.y), (b.x, b.y), LINE_WIDTH, LINE_COLOR);
        }
    }

    /// Index pairs `(i, j)` with `i < j` closer than the connection distance.
    pub fn connections(&self) -> Vec<(usize, usize)> {
        let limit = self.tier.connection_distance;
        let mut pairs = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                if a.distance(b) < limit {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
