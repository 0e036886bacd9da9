// Shared tuning constants for the hero particle field and the page glue.

// Particle population
pub const MAX_PARTICLE_COUNT: usize = 80;
pub const DENSITY_DIVISOR: f64 = 15_000.0; // canvas px² per particle
pub const PARTICLE_SPEED_SCALE: f64 = 0.5; // initial velocity components in [-s/2, s/2]
pub const PARTICLE_RADIUS_MIN: f64 = 1.0;
pub const PARTICLE_RADIUS_MAX: f64 = 3.0;
pub const PARTICLE_OPACITY_MIN: f64 = 0.2;
pub const PARTICLE_OPACITY_MAX: f64 = 0.7;

// Motion
pub const MAX_SPEED: f64 = 2.0; // px per frame
pub const REPULSION_RADIUS: f64 = 150.0;
pub const REPULSION_STRENGTH: f64 = 0.02;

// Connections
pub const CONNECTION_DISTANCE: f64 = 120.0;
pub const CONNECTION_MAX_ALPHA: f64 = 0.3; // alpha of a line between coincident particles
pub const CONNECTION_LINE_WIDTH: f64 = 0.5;

// Palette (sky blue)
pub const PARTICLE_RGB: [u8; 3] = [99, 179, 237];

// Host timing (milliseconds)
pub const RESIZE_DEBOUNCE_MS: u64 = 250;
pub const ACTIVE_LINK_THROTTLE_MS: u64 = 100;
pub const LOADER_HIDE_DELAY_MS: i32 = 1500;
pub const COUNT_UP_DURATION_MS: u64 = 2000;
pub const FORM_SUBMIT_DELAY_MS: i32 = 1500;
pub const TOAST_AUTO_DISMISS_MS: i32 = 5000;
pub const TOAST_SLIDE_OUT_MS: i32 = 300;

// Scroll behaviour
pub const HEADER_SCROLL_OFFSET: f64 = 100.0; // header gets `scrolled` past this
pub const ACTIVE_LINK_PROBE_OFFSET: f64 = 100.0; // below the header bottom

// Viewport-entry thresholds (fraction visible)
pub const REVEAL_THRESHOLD: f64 = 0.15;
pub const COUNTER_THRESHOLD: f64 = 0.5;
