// Frame-driven controller for the hero particle field.
//
// `Animator` owns the field, the pointer state and the collaborators it
// draws with and schedules through. Every method runs on the UI thread; host
// callbacks (pointer, resize, visibility, animation frame) are turned into
// [`HostEvent`]s and fed to [`Animator::handle`] one at a time.

use crate::constants::RESIZE_DEBOUNCE_MS;
use crate::core::{ConfigError, Debouncer, DrawSurface, FieldConfig, ParticleField, PointerState};
use glam::DVec2;
use instant::Instant;
use rand::rngs::StdRng;
use std::time::Duration;

/// Host handle for one outstanding frame request.
pub type FrameRequest = i32;

/// "Run the frame callback before the next repaint" and its cancellation.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Option<FrameRequest>;
    fn cancel_frame(&mut self, request: FrameRequest);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    PointerMoved { x: f64, y: f64 },
    PointerLeft,
    Resized { at: Instant },
    VisibilityChanged { hidden: bool },
    Frame { at: Instant },
    Teardown,
}

pub struct Animator<S: DrawSurface, F: FrameScheduler> {
    surface: S,
    scheduler: F,
    field: ParticleField,
    pointer: PointerState,
    resize: Debouncer,
    rng: StdRng,
    pending: Option<FrameRequest>,
}

impl<S: DrawSurface, F: FrameScheduler> Animator<S, F> {
    pub fn new(
        mut surface: S,
        scheduler: F,
        config: FieldConfig,
        mut rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let (w, h) = surface.refresh_size();
        let field = ParticleField::initialize(w, h, config, &mut rng);
        log::info!("[field] {}x{} particles={}", w, h, field.particles.len());
        Ok(Self {
            surface,
            scheduler,
            field,
            pointer: PointerState::Absent,
            resize: Debouncer::new(Duration::from_millis(RESIZE_DEBOUNCE_MS)),
            rng,
            pending: None,
        })
    }

    pub fn handle(&mut self, event: HostEvent) {
        match event {
            HostEvent::PointerMoved { x, y } => {
                self.pointer = PointerState::At(DVec2::new(x, y));
            }
            HostEvent::PointerLeft => self.pointer = PointerState::Absent,
            HostEvent::Resized { at } => self.resize.notify(at),
            HostEvent::VisibilityChanged { hidden: true } => self.stop(),
            HostEvent::VisibilityChanged { hidden: false } => self.start(),
            HostEvent::Frame { at } => self.frame(at),
            // unload may be cancelled or the page restored from cache; a
            // later visible notification restarts the loop
            HostEvent::Teardown => {
                self.stop();
                self.resize.cancel();
            }
        }
    }

    /// Begin requesting frames. No-op while a request is already outstanding.
    pub fn start(&mut self) {
        if self.pending.is_some() {
            return;
        }
        self.pending = self.scheduler.request_frame();
        if self.pending.is_some() {
            log::info!("[field] loop started");
        } else {
            log::warn!("[field] frame request refused; loop not started");
        }
    }

    pub fn stop(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
            log::info!("[field] loop stopped");
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    fn frame(&mut self, at: Instant) {
        // a callback that outlived stop() has nothing to do
        if self.pending.take().is_none() {
            return;
        }
        if self.resize.fire(at) {
            let (w, h) = self.surface.refresh_size();
            self.field.resize(w, h, &mut self.rng);
            log::debug!("[field] resized {}x{} particles={}", w, h, self.field.particles.len());
        }
        self.field.step(&self.pointer);
        self.field.render(&mut self.surface);
        self.pending = self.scheduler.request_frame();
    }

    #[inline]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    #[inline]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    #[inline]
    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }
}
