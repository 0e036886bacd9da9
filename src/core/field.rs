// Hero particle field: particle state, per-frame motion and the draw pass.
//
// Everything here is platform-free so it can be driven by the web frontend
// and by host-side tests with a fake surface and a seeded rng.

use crate::constants::*;
use glam::DVec2;
use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("{name} must be zero or positive, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("invalid value {value:?} for field setting {key:?}")]
    InvalidValue { key: String, value: String },

    #[error("unknown field setting {0:?}")]
    UnknownKey(String),
}

/// RGBA colour as understood by a 2D canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    #[inline]
    pub fn from_rgb(rgb: [u8; 3], a: f64) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a,
        }
    }

    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Drawing target for [`ParticleField::render`].
///
/// Implementations run on the UI thread only.
pub trait DrawSurface {
    /// Re-read the host layout size, adopt it as the drawing size and return it.
    fn refresh_size(&mut self) -> (f64, f64);
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);
    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, line_width: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub max_count: usize,
    pub density_divisor: f64,
    pub speed_scale: f64,
    pub max_speed: f64,
    pub repulsion_radius: f64,
    pub repulsion_strength: f64,
    pub connection_distance: f64,
    pub connection_max_alpha: f64,
    pub line_width: f64,
    pub rgb: [u8; 3],
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_count: MAX_PARTICLE_COUNT,
            density_divisor: DENSITY_DIVISOR,
            speed_scale: PARTICLE_SPEED_SCALE,
            max_speed: MAX_SPEED,
            repulsion_radius: REPULSION_RADIUS,
            repulsion_strength: REPULSION_STRENGTH,
            connection_distance: CONNECTION_DISTANCE,
            connection_max_alpha: CONNECTION_MAX_ALPHA,
            line_width: CONNECTION_LINE_WIDTH,
            rgb: PARTICLE_RGB,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("density_divisor", self.density_divisor),
            ("max_speed", self.max_speed),
            ("repulsion_radius", self.repulsion_radius),
            ("connection_distance", self.connection_distance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        for (name, value) in [
            ("speed_scale", self.speed_scale),
            ("repulsion_strength", self.repulsion_strength),
            ("connection_max_alpha", self.connection_max_alpha),
            ("line_width", self.line_width),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }
        Ok(())
    }

    /// Apply `data-*` style overrides (keys without the `data-` prefix) and
    /// validate the result.
    pub fn with_overrides<'a, I>(mut self, pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, raw) in pairs {
            let invalid = || ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
            };
            let value = raw.trim();
            if key == "particle-count" {
                self.max_count = value.parse().map_err(|_| invalid())?;
            } else if let Some(slot) = self.float_setting(key) {
                *slot = value.parse().map_err(|_| invalid())?;
            } else {
                return Err(ConfigError::UnknownKey(key.to_string()));
            }
        }
        self.validate()?;
        Ok(self)
    }

    fn float_setting(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "particle-speed" => Some(&mut self.speed_scale),
            "max-speed" => Some(&mut self.max_speed),
            "density" => Some(&mut self.density_divisor),
            "connection-distance" => Some(&mut self.connection_distance),
            "repulsion-radius" => Some(&mut self.repulsion_radius),
            "repulsion-strength" => Some(&mut self.repulsion_strength),
            _ => None,
        }
    }

    /// Number of particles for a viewport of the given size.
    pub fn particle_count(&self, width: f64, height: f64) -> usize {
        let by_area = (width * height / self.density_divisor).floor();
        if by_area.is_finite() && by_area > 0.0 {
            (by_area as usize).min(self.max_count)
        } else {
            0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64, speed_scale: f64) -> Self {
        let pos = DVec2::new(rng.gen::<f64>() * width, rng.gen::<f64>() * height);
        let vel = DVec2::new(
            (rng.gen::<f64>() - 0.5) * speed_scale,
            (rng.gen::<f64>() - 0.5) * speed_scale,
        );
        let radius =
            PARTICLE_RADIUS_MIN + rng.gen::<f64>() * (PARTICLE_RADIUS_MAX - PARTICLE_RADIUS_MIN);
        let opacity = PARTICLE_OPACITY_MIN
            + rng.gen::<f64>() * (PARTICLE_OPACITY_MAX - PARTICLE_OPACITY_MIN);
        Self {
            pos,
            vel,
            radius,
            opacity,
        }
    }
}

/// Last known pointer location in canvas-local pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
    #[default]
    Absent,
    At(DVec2),
}

impl PointerState {
    #[inline]
    pub fn position(&self) -> Option<DVec2> {
        match self {
            PointerState::Absent => None,
            PointerState::At(p) => Some(*p),
        }
    }
}

/// Connection strength for two particles `distance` apart: `1` when they
/// coincide, falling linearly to `0` at `connection_distance` and beyond.
#[inline]
pub fn connection_strength(distance: f64, connection_distance: f64) -> f64 {
    (1.0 - distance / connection_distance).max(0.0)
}

/// Velocity change pushing a particle at `pos` away from `pointer`.
///
/// Zero outside the radius and when the particle sits exactly on the pointer.
pub fn repulsion_impulse(pos: DVec2, pointer: DVec2, config: &FieldConfig) -> DVec2 {
    let away = pos - pointer;
    let d = away.length();
    // also rejects NaN coordinates
    if !(d > 0.0 && d < config.repulsion_radius) {
        return DVec2::ZERO;
    }
    let force = (config.repulsion_radius - d) / config.repulsion_radius * config.repulsion_strength;
    away / d * force
}

#[inline]
fn reflect_axis(pos: &mut f64, vel: &mut f64, extent: f64) {
    if *pos < 0.0 {
        *pos = -*pos;
        *vel = -*vel;
    } else if *pos > extent {
        *pos = 2.0 * extent - *pos;
        *vel = -*vel;
    }
}

pub struct ParticleField {
    pub particles: Vec<Particle>,
    width: f64,
    height: f64,
    config: FieldConfig,
}

impl ParticleField {
    /// Build a fresh particle set for a `width` x `height` viewport.
    pub fn initialize<R: Rng + ?Sized>(
        width: f64,
        height: f64,
        config: FieldConfig,
        rng: &mut R,
    ) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            width,
            height,
            config,
        };
        field.resize(width, height, rng);
        field
    }

    /// Discard every particle and respawn for the new viewport size.
    pub fn resize<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.width = width;
        self.height = height;
        let count = self.config.particle_count(width, height);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles
                .push(Particle::spawn(rng, width, height, self.config.speed_scale));
        }
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Advance every particle by one frame, in index order.
    pub fn step(&mut self, pointer: &PointerState) {
        let pointer = pointer.position();
        for p in &mut self.particles {
            p.pos += p.vel;
            reflect_axis(&mut p.pos.x, &mut p.vel.x, self.width);
            reflect_axis(&mut p.pos.y, &mut p.vel.y, self.height);
            if let Some(at) = pointer {
                p.vel += repulsion_impulse(p.pos, at, &self.config);
            }
            p.vel = p.vel.clamp_length_max(self.config.max_speed);
        }
    }

    /// Unordered pairs `(i, j, strength)` close enough to be joined by a line.
    pub fn connections(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let cd = self.config.connection_distance;
        self.particles.iter().enumerate().flat_map(move |(i, a)| {
            self.particles[i + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(k, b)| {
                    let strength = connection_strength(a.pos.distance(b.pos), cd);
                    (strength > 0.0).then_some((i, i + 1 + k, strength))
                })
        })
    }

    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let cfg = &self.config;
        surface.clear(self.width, self.height);
        for p in &self.particles {
            surface.fill_circle(p.pos, p.radius, Rgba::from_rgb(cfg.rgb, p.opacity));
        }
        for (i, j, strength) in self.connections() {
            let color = Rgba::from_rgb(cfg.rgb, strength * cfg.connection_max_alpha);
            surface.stroke_line(
                self.particles[i].pos,
                self.particles[j].pos,
                color,
                cfg.line_width,
            );
        }
    }
}
