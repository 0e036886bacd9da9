// Host-side tests for the particle field.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod field {
    include!("../src/core/field.rs");
}

use constants::*;
use field::*;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const EPS: f64 = 1e-9;

#[derive(Default)]
struct RecordingSurface {
    clears: usize,
    circles: Vec<(DVec2, f64, Rgba)>,
    lines: Vec<(DVec2, DVec2, Rgba, f64)>,
}

impl DrawSurface for RecordingSurface {
    fn refresh_size(&mut self) -> (f64, f64) {
        (800.0, 600.0)
    }
    fn clear(&mut self, _width: f64, _height: f64) {
        self.clears += 1;
    }
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.circles.push((center, radius, color));
    }
    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, line_width: f64) {
        self.lines.push((from, to, color, line_width));
    }
}

fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
    Particle {
        pos: DVec2::new(x, y),
        vel: DVec2::new(vx, vy),
        radius: 2.0,
        opacity: 0.5,
    }
}

fn field_with(particles: Vec<Particle>, config: FieldConfig) -> ParticleField {
    let mut field = ParticleField::initialize(800.0, 600.0, config, &mut seeded(1));
    field.particles = particles;
    field
}

#[test]
fn count_for_800_by_600_is_32() {
    let cfg = FieldConfig {
        max_count: 80,
        density_divisor: 15_000.0,
        ..FieldConfig::default()
    };
    assert_eq!(cfg.particle_count(800.0, 600.0), 32);
    let field = ParticleField::initialize(800.0, 600.0, cfg, &mut seeded(3));
    assert_eq!(field.particles.len(), 32);
}

#[test]
fn count_is_capped_and_never_negative() {
    let cfg = FieldConfig::default();
    assert_eq!(cfg.particle_count(4000.0, 4000.0), cfg.max_count);
    assert_eq!(cfg.particle_count(0.0, 600.0), 0);
    assert_eq!(cfg.particle_count(100.0, 100.0), 0); // 10000 / 15000 floors to 0
    assert_eq!(cfg.particle_count(-50.0, 600.0), 0);
}

#[test]
fn resize_matches_count_formula() {
    let cfg = FieldConfig::default();
    let mut rng = seeded(9);
    let mut field = ParticleField::initialize(800.0, 600.0, cfg.clone(), &mut rng);
    for (w, h) in [(320.0, 480.0), (1920.0, 1080.0), (1.0, 1.0), (1024.0, 300.0)] {
        field.resize(w, h, &mut rng);
        let expected = ((w * h / cfg.density_divisor).floor() as usize).min(cfg.max_count);
        assert_eq!(field.particles.len(), expected, "size {}x{}", w, h);
        assert_eq!(field.size(), (w, h));
    }
}

#[test]
fn initialize_is_reproducible_with_same_seed() {
    let a = ParticleField::initialize(1200.0, 800.0, FieldConfig::default(), &mut seeded(42));
    let b = ParticleField::initialize(1200.0, 800.0, FieldConfig::default(), &mut seeded(42));
    assert_eq!(a.particles, b.particles);
    let c = ParticleField::initialize(1200.0, 800.0, FieldConfig::default(), &mut seeded(43));
    assert_ne!(a.particles, c.particles);
}

#[test]
fn initial_particles_respect_ranges() {
    let cfg = FieldConfig::default();
    let half = cfg.speed_scale / 2.0;
    let field = ParticleField::initialize(1600.0, 900.0, cfg, &mut seeded(5));
    assert!(!field.particles.is_empty());
    for p in &field.particles {
        assert!(p.pos.x >= 0.0 && p.pos.x < 1600.0);
        assert!(p.pos.y >= 0.0 && p.pos.y < 900.0);
        assert!(p.vel.x.abs() <= half && p.vel.y.abs() <= half);
        assert!(p.radius >= 1.0 && p.radius < 3.0);
        assert!(p.opacity >= 0.2 && p.opacity < 0.7);
    }
}

#[test]
fn left_edge_reflects_velocity_and_position() {
    let mut field = field_with(vec![particle(0.0, 50.0, -0.3, 0.0)], FieldConfig::default());
    field.step(&PointerState::Absent);
    let p = field.particles[0];
    assert!((p.vel.x - 0.3).abs() < EPS);
    assert!((p.pos.x - 0.3).abs() < EPS);
    assert_eq!(p.pos.y, 50.0);
}

#[test]
fn far_edges_reflect_back_inside() {
    let mut field = field_with(
        vec![particle(799.9, 599.5, 0.5, 1.0)],
        FieldConfig::default(),
    );
    field.step(&PointerState::Absent);
    let p = field.particles[0];
    assert!(p.vel.x < 0.0 && p.vel.y < 0.0);
    assert!(p.pos.x <= 800.0 && p.pos.y <= 600.0);
    assert!((p.pos.x - 799.6).abs() < 1e-6);
    assert!((p.pos.y - 599.5).abs() < 1e-6);
}

#[test]
fn repulsion_scenario_pushes_away_with_expected_magnitude() {
    let cfg = FieldConfig {
        repulsion_radius: 150.0,
        repulsion_strength: 0.6,
        ..FieldConfig::default()
    };
    let impulse = repulsion_impulse(DVec2::new(150.0, 100.0), DVec2::new(100.0, 100.0), &cfg);
    // pointer-minus-particle is (-1, 0); the impulse points the other way
    assert!((impulse.x - 0.4).abs() < EPS);
    assert!(impulse.y.abs() < EPS);

    let mut field = field_with(vec![particle(150.0, 100.0, 0.0, 0.0)], cfg);
    field.step(&PointerState::At(DVec2::new(100.0, 100.0)));
    assert!((field.particles[0].vel.x - 0.4).abs() < EPS);
}

#[test]
fn repulsion_skips_coincident_and_far_pointers() {
    let cfg = FieldConfig::default();
    let at = DVec2::new(10.0, 10.0);
    assert_eq!(repulsion_impulse(at, at, &cfg), DVec2::ZERO);
    let edge = DVec2::new(10.0 + cfg.repulsion_radius, 10.0);
    assert_eq!(repulsion_impulse(edge, at, &cfg), DVec2::ZERO);
    let far = DVec2::new(5000.0, -3000.0);
    assert_eq!(repulsion_impulse(far, at, &cfg), DVec2::ZERO);
    let nan = DVec2::new(f64::NAN, 0.0);
    assert_eq!(repulsion_impulse(at, nan, &cfg), DVec2::ZERO);
}

#[test]
fn particle_on_pointer_stays_finite() {
    let mut field = field_with(vec![particle(200.0, 200.0, 0.0, 0.0)], FieldConfig::default());
    field.step(&PointerState::At(DVec2::new(200.0, 200.0)));
    let p = field.particles[0];
    assert!(p.vel.x.is_finite() && p.vel.y.is_finite());
    assert_eq!(p.vel, DVec2::ZERO);
}

#[test]
fn speed_is_clamped_preserving_direction() {
    let mut field = field_with(vec![particle(400.0, 300.0, 3.0, 4.0)], FieldConfig::default());
    field.step(&PointerState::Absent);
    let v = field.particles[0].vel;
    assert!((v.length() - 2.0).abs() < EPS);
    assert!((v.x - 1.2).abs() < EPS && (v.y - 1.6).abs() < EPS);
}

#[test]
fn many_frames_keep_bounds_speed_and_count() {
    let cfg = FieldConfig {
        repulsion_strength: 0.6,
        ..FieldConfig::default()
    };
    let max_speed = cfg.max_speed;
    let mut field = ParticleField::initialize(800.0, 600.0, cfg, &mut seeded(11));
    let n = field.particles.len();
    for frame in 0..600 {
        let t = frame as f64 * 0.05;
        let pointer = if frame % 150 < 100 {
            PointerState::At(DVec2::new(400.0 + 300.0 * t.cos(), 300.0 + 200.0 * t.sin()))
        } else {
            PointerState::Absent
        };
        field.step(&pointer);
        assert_eq!(field.particles.len(), n);
        for p in &field.particles {
            assert!(p.vel.length() <= max_speed + EPS);
            assert!(p.pos.x >= -max_speed && p.pos.x <= 800.0 + max_speed);
            assert!(p.pos.y >= -max_speed && p.pos.y <= 600.0 + max_speed);
        }
    }
}

#[test]
fn absent_pointer_only_flips_velocity_signs() {
    let mut field = ParticleField::initialize(300.0, 200.0, FieldConfig::default(), &mut seeded(21));
    for _ in 0..400 {
        let before: Vec<DVec2> = field.particles.iter().map(|p| p.vel).collect();
        field.step(&PointerState::Absent);
        for (p, v) in field.particles.iter().zip(before) {
            assert_eq!(p.vel.x.abs(), v.x.abs());
            assert_eq!(p.vel.y.abs(), v.y.abs());
        }
    }
}

#[test]
fn connection_strength_is_linear_and_zero_at_threshold() {
    assert_eq!(connection_strength(120.0, 120.0), 0.0);
    assert_eq!(connection_strength(200.0, 120.0), 0.0);
    assert!((connection_strength(60.0, 120.0) - 0.5).abs() < EPS);
    assert_eq!(connection_strength(0.0, 120.0), 1.0);
}

#[test]
fn particles_exactly_at_connection_distance_are_not_joined() {
    let cfg = FieldConfig::default();
    let cd = cfg.connection_distance;
    let field = field_with(
        vec![particle(100.0, 100.0, 0.0, 0.0), particle(100.0 + cd, 100.0, 0.0, 0.0)],
        cfg,
    );
    assert_eq!(field.connections().count(), 0);
    let mut surface = RecordingSurface::default();
    field.render(&mut surface);
    assert!(surface.lines.is_empty());
    assert_eq!(surface.circles.len(), 2);
}

#[test]
fn coincident_particles_draw_full_strength_line() {
    let cfg = FieldConfig::default();
    let max_alpha = cfg.connection_max_alpha;
    let field = field_with(
        vec![particle(50.0, 50.0, 0.0, 0.0), particle(50.0, 50.0, 0.0, 0.0)],
        cfg,
    );
    let mut surface = RecordingSurface::default();
    field.render(&mut surface);
    assert_eq!(surface.lines.len(), 1);
    let (_, _, color, width) = surface.lines[0];
    assert!(color.a.is_finite());
    assert!((color.a - max_alpha).abs() < EPS);
    assert_eq!(width, CONNECTION_LINE_WIDTH);
}

#[test]
fn render_draws_each_particle_then_close_pairs() {
    let field = field_with(
        vec![
            particle(10.0, 10.0, 0.0, 0.0),
            particle(70.0, 10.0, 0.0, 0.0),
            particle(700.0, 500.0, 0.0, 0.0),
        ],
        FieldConfig::default(),
    );
    let pairs: Vec<(usize, usize)> = field.connections().map(|(i, j, _)| (i, j)).collect();
    assert_eq!(pairs, vec![(0, 1)]);

    let mut surface = RecordingSurface::default();
    field.render(&mut surface);
    assert_eq!(surface.clears, 1);
    assert_eq!(surface.circles.len(), 3);
    for ((_, radius, color), p) in surface.circles.iter().zip(&field.particles) {
        assert_eq!(*radius, p.radius);
        assert_eq!(color.a, p.opacity);
        assert_eq!([color.r, color.g, color.b], PARTICLE_RGB);
    }
    assert_eq!(surface.lines.len(), 1);
    assert!((surface.lines[0].2.a - 0.5 * CONNECTION_MAX_ALPHA).abs() < EPS);
}

#[test]
fn rgba_formats_as_css() {
    assert_eq!(Rgba::from_rgb([99, 179, 237], 0.5).css(), "rgba(99, 179, 237, 0.5)");
}

#[test]
fn default_config_is_valid() {
    assert_eq!(FieldConfig::default().validate(), Ok(()));
}

#[test]
fn validate_rejects_degenerate_settings() {
    let zero_density = FieldConfig {
        density_divisor: 0.0,
        ..FieldConfig::default()
    };
    assert!(matches!(
        zero_density.validate(),
        Err(ConfigError::NotPositive { name: "density_divisor", .. })
    ));
    let zero_distance = FieldConfig {
        connection_distance: 0.0,
        ..FieldConfig::default()
    };
    assert!(matches!(
        zero_distance.validate(),
        Err(ConfigError::NotPositive { name: "connection_distance", .. })
    ));
    let negative_speed = FieldConfig {
        speed_scale: -1.0,
        ..FieldConfig::default()
    };
    assert!(matches!(
        negative_speed.validate(),
        Err(ConfigError::Negative { name: "speed_scale", .. })
    ));
}

#[test]
fn overrides_apply_and_validate() {
    let cfg = FieldConfig::default()
        .with_overrides([("particle-count", "40"), ("repulsion-strength", " 0.6 ")])
        .unwrap();
    assert_eq!(cfg.max_count, 40);
    assert_eq!(cfg.repulsion_strength, 0.6);

    let err = FieldConfig::default()
        .with_overrides([("max-speed", "fast")])
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidValue {
            key: "max-speed".into(),
            value: "fast".into()
        }
    );

    let err = FieldConfig::default()
        .with_overrides([("gravity", "9.8")])
        .unwrap_err();
    assert_eq!(err, ConfigError::UnknownKey("gravity".into()));

    let err = FieldConfig::default()
        .with_overrides([("density", "0")])
        .unwrap_err();
    assert!(matches!(err, ConfigError::NotPositive { .. }));
}
