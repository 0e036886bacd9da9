use crate::animator::{Animator, FrameRequest, FrameScheduler, HostEvent};
use crate::canvas::CanvasSurface;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Slot holding the per-frame callback; filled by [`start_loop`].
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub type HeroAnimator = Animator<CanvasSurface, RafScheduler>;

/// `requestAnimationFrame`-backed scheduler.
pub struct RafScheduler {
    window: web::Window,
    tick: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: web::Window, tick: FrameCallback) -> Self {
        Self { window, tick }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        let tick = self.tick.borrow();
        let callback = tick.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(id),
            Err(e) => {
                log::error!("requestAnimationFrame error: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if let Err(e) = self.window.cancel_animation_frame(request) {
            log::warn!("cancelAnimationFrame error: {:?}", e);
        }
    }
}

/// Feed one host event to the animator.
#[inline]
pub fn dispatch(animator: &Rc<RefCell<HeroAnimator>>, event: HostEvent) {
    animator.borrow_mut().handle(event);
}

/// Install the frame callback and request the first frame.
pub fn start_loop(animator: Rc<RefCell<HeroAnimator>>, tick: FrameCallback) {
    let animator_tick = animator.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        dispatch(&animator_tick, HostEvent::Frame { at: Instant::now() });
    }) as Box<dyn FnMut(f64)>));
    animator.borrow_mut().start();
}
