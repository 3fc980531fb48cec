use std::collections::BTreeSet;

use folio_types::ParticleConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::field::{ParticleField, ParticleSurface};

#[derive(Default)]
struct FakeSurface {
    origin: (f64, f64),
    next: u32,
    attached: BTreeSet<u32>,
    detached: Vec<u32>,
    fades: Vec<(u32, f64)>,
    last_translate: Option<(u32, f64, f64)>,
    released: bool,
}

impl FakeSurface {
    /// Simulates the fade tween finishing before the particle is retired.
    fn finish_fade(&mut self, handle: u32) {
        self.attached.remove(&handle);
    }
}

impl ParticleSurface for FakeSurface {
    type Handle = u32;

    fn origin(&self) -> (f64, f64) {
        self.origin
    }

    fn spawn(&mut self, _x: f64, _y: f64, _size: f64) -> u32 {
        let handle = self.next;
        self.next += 1;
        self.attached.insert(handle);
        handle
    }

    fn fade_out(&mut self, handle: &u32, secs: f64) {
        self.fades.push((*handle, secs));
    }

    fn translate(&mut self, handle: &u32, x: f64, y: f64) {
        self.last_translate = Some((*handle, x, y));
    }

    fn detach(&mut self, handle: &u32) {
        if self.attached.remove(handle) {
            self.detached.push(*handle);
        }
    }

    fn release(&mut self) {
        self.released = true;
    }
}

fn make_field() -> ParticleField<FakeSurface, StdRng> {
    let surface = FakeSurface {
        origin: (100.0, 50.0),
        ..Default::default()
    };
    ParticleField::new(surface, StdRng::seed_from_u64(7), ParticleConfig::default())
}

#[test]
fn test_create_uses_container_relative_coordinates() {
    let mut field = make_field();
    field.create_particle(130.0, 90.0);

    let particle = field.particles().next().unwrap();
    assert_eq!((particle.x, particle.y), (30.0, 40.0));
    assert_eq!(particle.life, 1.0);
    assert!((2.0..6.0).contains(&particle.size));
    assert!((-1.0..1.0).contains(&particle.vx));
    assert!((-1.0..1.0).contains(&particle.vy));
    assert_eq!(field.surface().fades, vec![(0, 2.0)]);
}

#[test]
fn test_collection_never_exceeds_capacity() {
    let mut field = make_field();
    for n in 0..50 {
        field.create_particle(n as f64, 0.0);
        assert!(field.len() <= 20);
    }
    assert_eq!(field.len(), 20);
    assert_eq!(field.surface().attached.len(), 20);
}

#[test]
fn test_twenty_five_samples_evict_five_oldest_in_order() {
    let mut field = make_field();
    for n in 0..25 {
        field.create_particle(100.0 + n as f64, 50.0);
    }

    assert_eq!(field.len(), 20);
    assert_eq!(field.surface().detached, vec![0, 1, 2, 3, 4]);
    let handles: Vec<u32> = field.particles().map(|p| p.handle).collect();
    assert_eq!(handles, (5..25).collect::<Vec<_>>());
}

#[test]
fn test_particle_removed_exactly_at_step_100() {
    let mut field = make_field();
    field.create_particle(100.0, 50.0);

    for _ in 0..99 {
        field.step();
    }
    assert_eq!(field.len(), 1);
    assert!(field.particles().next().unwrap().life > 0.0);

    field.step();
    assert!(field.is_empty());
    assert_eq!(field.surface().detached, vec![0]);
}

#[test]
fn test_step_integrates_velocity() {
    let mut field = make_field();
    field.create_particle(100.0, 50.0);
    let (vx, vy) = {
        let p = field.particles().next().unwrap();
        (p.vx, p.vy)
    };

    field.step();
    field.step();

    let p = field.particles().next().unwrap();
    assert!((p.x - 2.0 * vx).abs() < 1e-12);
    assert!((p.y - 2.0 * vy).abs() < 1e-12);
    assert_eq!(field.surface().last_translate, Some((0, p.x, p.y)));
}

#[test]
fn test_step_removes_only_spent_particles_in_order() {
    let mut field = make_field();
    field.create_particle(0.0, 0.0);
    for _ in 0..50 {
        field.step();
    }
    field.create_particle(0.0, 0.0);
    field.create_particle(0.0, 0.0);

    for _ in 0..50 {
        field.step();
    }
    let handles: Vec<u32> = field.particles().map(|p| p.handle).collect();
    assert_eq!(handles, vec![1, 2]);
}

#[test]
fn test_fifo_eviction_ignores_life() {
    // The oldest particle goes first even when younger ones are closer to death
    let mut field = make_field();
    for _ in 0..20 {
        field.create_particle(0.0, 0.0);
    }
    field.create_particle(0.0, 0.0);
    assert_eq!(field.surface().detached, vec![0]);
    assert_eq!(field.particles().next().unwrap().handle, 1);
}

#[test]
fn test_late_fade_completion_is_harmless() {
    let mut field = make_field();
    field.create_particle(0.0, 0.0);
    field.surface_mut().finish_fade(0);

    // Particle stays tracked until its life runs out
    assert_eq!(field.len(), 1);
    field.handle_resize();
    assert!(field.is_empty());
    assert!(field.surface().detached.is_empty());
}

#[test]
fn test_resize_clears_everything() {
    let mut field = make_field();
    for _ in 0..12 {
        field.create_particle(0.0, 0.0);
    }
    field.step();

    field.handle_resize();
    assert!(field.is_empty());
    assert!(field.surface().attached.is_empty());

    field.handle_resize();
    assert!(field.is_empty());
}

#[test]
fn test_destroy_releases_surface() {
    let mut field = make_field();
    field.create_particle(0.0, 0.0);
    field.destroy();
    assert!(field.is_empty());
    assert!(field.surface().attached.is_empty());
    assert!(field.surface().released);
}
