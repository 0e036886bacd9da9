use crate::animator::HostEvent;
use crate::frame::{dispatch, HeroAnimator};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

use crate::dom;

/// Resize, visibility, unload and back/forward-cache notifications for the
/// hero field.
pub fn wire_page_lifecycle(
    window: &web::Window,
    document: &web::Document,
    animator: Rc<RefCell<HeroAnimator>>,
) {
    let anim_resize = animator.clone();
    dom::add_listener(window, "resize", move |_| {
        dispatch(&anim_resize, HostEvent::Resized { at: Instant::now() });
    });

    let anim_vis = animator.clone();
    let doc = document.clone();
    dom::add_listener(document, "visibilitychange", move |_| {
        let hidden = doc.hidden();
        log::debug!("[page] visibility hidden={}", hidden);
        dispatch(&anim_vis, HostEvent::VisibilityChanged { hidden });
    });

    let anim_unload = animator.clone();
    dom::add_listener(window, "beforeunload", move |_| {
        dispatch(&anim_unload, HostEvent::Teardown);
    });

    let doc = document.clone();
    dom::add_listener(window, "pageshow", move |_| {
        dispatch(
            &animator,
            HostEvent::VisibilityChanged {
                hidden: doc.hidden(),
            },
        );
    });
}
