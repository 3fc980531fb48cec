use std::collections::VecDeque;

use folio_types::ParticleConfig;
use rand::Rng;

/// Visual side of the particle field.
///
/// Implementations own the actual elements. `detach` and the completion of
/// `fade_out` may both hit the same element; whichever runs second must be a
/// no-op.
pub trait ParticleSurface {
    type Handle;

    /// Top-left corner of the container in pointer coordinates.
    fn origin(&self) -> (f64, f64);

    /// Create and attach an element at container-relative `(x, y)`.
    fn spawn(&mut self, x: f64, y: f64, size: f64) -> Self::Handle;

    /// Fade/scale to zero over `secs`, detaching the element at the end.
    fn fade_out(&mut self, handle: &Self::Handle, secs: f64);

    fn translate(&mut self, handle: &Self::Handle, x: f64, y: f64);

    /// Remove the element from the document if still attached.
    fn detach(&mut self, handle: &Self::Handle);

    /// Drop any animations held on the container.
    fn release(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle<H> {
    pub handle: H,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub life: f64,
}

impl<H> Particle<H> {
    fn advance(&mut self, decay: f64) {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= decay;
    }

    pub fn is_spent(&self) -> bool {
        self.life <= 0.0
    }
}

pub struct ParticleField<S: ParticleSurface, R: Rng> {
    surface: S,
    rng: R,
    config: ParticleConfig,
    /// Insertion order; front is the oldest.
    particles: VecDeque<Particle<S::Handle>>,
}

impl<S: ParticleSurface, R: Rng> ParticleField<S, R> {
    pub fn new(surface: S, rng: R, config: ParticleConfig) -> Self {
        let capacity = config.capacity;
        Self {
            surface,
            rng,
            config,
            particles: VecDeque::with_capacity(capacity),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle<S::Handle>> {
        self.particles.iter()
    }

    /// Spawn a particle at absolute pointer coordinates.
    pub fn create_particle(&mut self, x: f64, y: f64) {
        let (left, top) = self.surface.origin();
        let (x, y) = (x - left, y - top);

        while self.particles.len() >= self.config.capacity.max(1) {
            let Some(oldest) = self.particles.pop_front() else {
                break;
            };
            self.surface.detach(&oldest.handle);
        }

        let size = self
            .rng
            .random_range(self.config.min_size_px..self.config.max_size_px);
        let speed = self.config.max_speed;
        let vx = self.rng.random_range(-speed..speed);
        let vy = self.rng.random_range(-speed..speed);

        let handle = self.surface.spawn(x, y, size);
        self.surface.fade_out(&handle, self.config.fade_secs);

        self.particles.push_back(Particle {
            handle,
            x,
            y,
            vx,
            vy,
            size,
            life: 1.0,
        });
    }

    /// Advance every particle one frame, oldest first, dropping spent ones.
    pub fn step(&mut self) {
        let decay = self.config.decay_per_frame;
        let surface = &mut self.surface;
        self.particles.retain_mut(|particle| {
            particle.advance(decay);
            surface.translate(&particle.handle, particle.x, particle.y);
            if particle.is_spent() {
                surface.detach(&particle.handle);
                false
            } else {
                true
            }
        });
    }

    /// Drop every particle immediately.
    pub fn handle_resize(&mut self) {
        for particle in self.particles.drain(..) {
            self.surface.detach(&particle.handle);
        }
    }

    pub fn destroy(&mut self) {
        self.handle_resize();
        self.surface.release();
    }
}
