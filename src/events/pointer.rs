use crate::animator::HostEvent;
use crate::frame::{dispatch, HeroAnimator};
use glam::DVec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub animator: Rc<RefCell<HeroAnimator>>,
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_pointermove(&w);
    wire_pointerleave(&w);
    wire_touchmove(&w);
}

/// Client coordinates mapped into canvas backing-store pixels.
#[inline]
pub fn client_to_canvas_px(canvas: &web::HtmlCanvasElement, client_x: f64, client_y: f64) -> DVec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = client_x - rect.left();
    let y_css = client_y - rect.top();
    if rect.width() > 0.0 && rect.height() > 0.0 {
        DVec2::new(
            x_css / rect.width() * canvas.width() as f64,
            y_css / rect.height() * canvas.height() as f64,
        )
    } else {
        DVec2::new(x_css, y_css)
    }
}

fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = client_to_canvas_px(&w.canvas, ev.client_x() as f64, ev.client_y() as f64);
        dispatch(&w.animator, HostEvent::PointerMoved { x: pos.x, y: pos.y });
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerleave(w: &PointerWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        dispatch(&w.animator, HostEvent::PointerLeft);
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}

// Touch scrolling cancels pointer events, so follow the first touch directly.
fn wire_touchmove(w: &PointerWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        if let Some(touch) = ev.touches().get(0) {
            let pos =
                client_to_canvas_px(&w.canvas, touch.client_x() as f64, touch.client_y() as f64);
            dispatch(&w.animator, HostEvent::PointerMoved { x: pos.x, y: pos.y });
        }
    }) as Box<dyn FnMut(_)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(true);
    _ = canvas_for_listener.add_event_listener_with_callback_and_add_event_listener_options(
        "touchmove",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}
