use crate::constants::*;
use crate::core::{
    active_section, anchor_scroll_top, anchor_target_id, header_scrolled, parse_js_int,
    reveal_delay_ms, CountUp, NavMenu, SectionBounds, Throttle,
};
use crate::dom;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Mobile navigation elements plus their shared open/closed state.
#[derive(Clone)]
pub struct NavWiring {
    pub toggle: web::Element,
    pub menu: web::Element,
    pub links: Rc<Vec<web::Element>>,
    pub body: Option<web::HtmlElement>,
    pub state: Rc<RefCell<NavMenu>>,
}

impl NavWiring {
    pub fn find(document: &web::Document) -> Option<Self> {
        let toggle = document.query_selector(".nav-toggle").ok().flatten()?;
        let menu = document.query_selector(".nav-menu").ok().flatten()?;
        Some(Self {
            toggle,
            menu,
            links: Rc::new(dom::query_all(document, ".nav-link")),
            body: document.body(),
            state: Rc::new(RefCell::new(NavMenu::default())),
        })
    }

    /// Push the current state into classes and `aria-expanded`.
    pub fn apply(&self) {
        let open = self.state.borrow().is_open();
        dom::set_class(&self.toggle, "active", open);
        dom::set_class(&self.menu, "active", open);
        if let Some(body) = &self.body {
            dom::set_class(body, "menu-open", open);
        }
        _ = self
            .toggle
            .set_attribute("aria-expanded", if open { "true" } else { "false" });
    }
}

pub fn wire_mobile_nav(document: &web::Document) -> Option<NavWiring> {
    let nav = NavWiring::find(document)?;

    let nav_toggle = nav.clone();
    dom::add_click_listener(&nav.toggle, move |_| {
        nav_toggle.state.borrow_mut().toggle();
        nav_toggle.apply();
    });

    for link in nav.links.iter() {
        let nav_link = nav.clone();
        dom::add_click_listener(link, move |_| {
            if nav_link.state.borrow_mut().close() {
                nav_link.apply();
            }
        });
    }
    Some(nav)
}

/// Hide the loader shortly after `load`, then start reveal animations.
pub fn wire_loader(window: &web::Window, document: &web::Document) {
    let doc = document.clone();
    dom::add_listener(window, "load", move |_| {
        let doc = doc.clone();
        dom::set_timeout(LOADER_HIDE_DELAY_MS, move || {
            if let Some(loader) = doc.get_element_by_id("loader") {
                dom::set_class(&loader, "hidden", true);
            }
            if let Some(body) = doc.body() {
                _ = body.style().remove_property("overflow");
            }
            wire_reveal(&doc);
        });
    });
}

/// Toggle `scrolled` on the header, at most once per animation frame.
pub fn wire_header_scroll(window: &web::Window, header: web::Element) {
    let ticking = Rc::new(Cell::new(false));
    add_passive_scroll(window, move || {
        if ticking.replace(true) {
            return;
        }
        let header = header.clone();
        let ticking = ticking.clone();
        dom::request_frame_once(move |_ts| {
            dom::set_class(&header, "scrolled", header_scrolled(dom::scroll_y()));
            ticking.set(false);
        });
    });
}

fn add_passive_scroll(window: &web::Window, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(true);
    _ = window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

/// In-page anchors scroll smoothly to their target below the fixed header.
pub fn wire_smooth_scroll(document: &web::Document, header: Option<web::HtmlElement>) {
    for anchor in dom::query_all(document, "a[href^=\"#\"]") {
        let doc = document.clone();
        let header = header.clone();
        let href_source = anchor.clone();
        dom::add_click_listener(&anchor, move |ev| {
            let Some(href) = href_source.get_attribute("href") else {
                return;
            };
            let Some(id) = anchor_target_id(&href) else {
                return;
            };
            let Some(target) = doc.get_element_by_id(id) else {
                return;
            };
            ev.prevent_default();
            let header_h = header.as_ref().map_or(0.0, |h| h.offset_height() as f64);
            let top = anchor_scroll_top(
                target.get_bounding_client_rect().top(),
                dom::scroll_y(),
                header_h,
            );
            if let Some(window) = web::window() {
                let opts = web::ScrollToOptions::new();
                opts.set_top(top);
                opts.set_behavior(web::ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&opts);
            }
        });
    }
}

/// Run `on_enter` once for each element the first time it becomes
/// `threshold` visible.
fn observe_once(
    elements: Vec<web::Element>,
    threshold: f64,
    on_enter: impl Fn(web::Element) + 'static,
) {
    if elements.is_empty() {
        return;
    }
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    observer.unobserve(&target);
                    on_enter(target);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    match web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            for el in &elements {
                observer.observe(el);
            }
        }
        Err(e) => log::warn!("IntersectionObserver unavailable: {:?}", e),
    }
    callback.forget();
}

/// `[data-animate]` elements get `animated` after their optional `data-delay`.
pub fn wire_reveal(document: &web::Document) {
    observe_once(
        dom::query_all(document, "[data-animate]"),
        REVEAL_THRESHOLD,
        |el| {
            let delay = reveal_delay_ms(el.get_attribute("data-delay").as_deref());
            dom::set_timeout(delay, move || dom::set_class(&el, "animated", true));
        },
    );
}

pub fn wire_counters(document: &web::Document) {
    observe_once(
        dom::query_all(document, ".stat-number[data-count]"),
        COUNTER_THRESHOLD,
        animate_counter,
    );
}

fn animate_counter(el: web::Element) {
    let Some(target) = el.get_attribute("data-count").as_deref().and_then(parse_js_int) else {
        log::debug!("[counter] element without a numeric data-count");
        return;
    };
    let count = CountUp::new(target, Duration::from_millis(COUNT_UP_DURATION_MS));
    count_frame(el, count, Instant::now());
}

fn count_frame(el: web::Element, count: CountUp, started: Instant) {
    dom::request_frame_once(move |_ts| {
        let (value, done) = count.value_at(started.elapsed());
        el.set_text_content(Some(&value.to_string()));
        if !done {
            count_frame(el, count, started);
        }
    });
}

/// Highlight the nav link whose section sits under the header.
pub fn wire_active_link(window: &web::Window, document: &web::Document, header: web::HtmlElement) {
    let links = dom::query_all(document, ".nav-link");
    let doc = document.clone();
    let mut throttle = Throttle::new(Duration::from_millis(ACTIVE_LINK_THROTTLE_MS));
    add_passive_scroll(window, move || {
        if !throttle.ready(Instant::now()) {
            return;
        }
        let sections: Vec<SectionBounds> = dom::query_all(&doc, "section[id]")
            .into_iter()
            .filter_map(|s| {
                let s = s.dyn_into::<web::HtmlElement>().ok()?;
                Some(SectionBounds {
                    id: s.id(),
                    top: s.offset_top() as f64,
                    height: s.offset_height() as f64,
                })
            })
            .collect();
        let probe = dom::scroll_y() + header.offset_height() as f64 + ACTIVE_LINK_PROBE_OFFSET;
        if let Some(id) = active_section(probe, &sections) {
            let want = format!("#{}", id);
            for link in &links {
                let is_active = link.get_attribute("href").as_deref() == Some(want.as_str());
                dom::set_class(link, "active", is_active);
            }
        }
    });
}
