use crate::site::NavWiring;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

/// Escape closes the mobile menu when it is open.
pub fn wire_menu_escape(document: &web::Document, nav: NavWiring) {
    dom::add_listener(document, "keydown", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        let closed = nav.state.borrow_mut().on_key(&ev.key());
        if closed {
            nav.apply();
        }
    });
}
