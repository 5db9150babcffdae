//! Particle network background for the folio page.
//!
//! A [`ParticleField`] owns a set of slowly drifting points sized to a
//! container and, once per frame, draws them together with lines between
//! every pair closer than the current [`Tier`]'s connection distance. Drawing
//! goes through the [`Surface`] trait; [`DisplayList`] records a frame and
//! [`ParticleCanvas`] paints a recorded frame onto a ratatui buffer.

mod canvas;
mod field;
mod particle;
mod surface;
mod tier;

pub use canvas::ParticleCanvas;
pub use field::{LINE_COLOR, LINE_WIDTH, PARTICLE_COLOR, ParticleField};
pub use particle::Particle;
pub use surface::{DisplayList, DrawCommand, Surface};
pub use tier::{Tier, WIDTH_BREAKPOINT};
