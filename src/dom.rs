use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// All elements matching `selector`, in document order.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let list = match document.query_selector_all(selector) {
        Ok(l) => l,
        Err(e) => {
            log::warn!("querySelectorAll({}) failed: {:?}", selector, e);
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

/// Attach a long-lived listener; the closure lives for the page lifetime.
pub fn add_listener(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::warn!("addEventListener({}) failed: {:?}", event, e);
    }
    closure.forget();
}

#[inline]
pub fn add_click_listener(el: &web::Element, mut handler: impl FnMut(web::Event) + 'static) {
    add_listener(el, "click", move |ev| handler(ev));
}

/// One-shot `setTimeout`; returns the timer handle.
pub fn set_timeout(ms: i32, callback: impl FnOnce() + 'static) -> Option<i32> {
    let window = web::window()?;
    let callback = Closure::once_into_js(callback);
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms)
        .map_err(|e| log::warn!("setTimeout failed: {:?}", e))
        .ok()
}

/// One-shot `requestAnimationFrame`; the callback receives the frame timestamp.
pub fn request_frame_once(callback: impl FnOnce(f64) + 'static) -> Option<i32> {
    let window = web::window()?;
    let callback = Closure::once_into_js(callback);
    window
        .request_animation_frame(callback.unchecked_ref())
        .map_err(|e| log::warn!("requestAnimationFrame failed: {:?}", e))
        .ok()
}

/// Resolves after `ms` milliseconds.
pub async fn sleep_ms(ms: i32) -> Result<(), JsValue> {
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let scheduled = web::window()
            .ok_or_else(|| JsValue::from_str("no window"))
            .and_then(|w| w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms));
        if let Err(e) = scheduled {
            _ = reject.call1(&JsValue::NULL, &e);
        }
    });
    JsFuture::from(promise).await.map(|_| ())
}

#[inline]
pub fn scroll_y() -> f64 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn set_class(el: &web::Element, class: &str, on: bool) {
    let cl = el.class_list();
    let res = if on { cl.add_1(class) } else { cl.remove_1(class) };
    if let Err(e) = res {
        log::debug!("classList update ({}) failed: {:?}", class, e);
    }
}
