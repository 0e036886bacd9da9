#![cfg(target_arch = "wasm32")]
use crate::core::Toaster;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod animator;
mod canvas;
mod constants;
mod contact;
mod core;
mod dom;
mod events;
mod frame;
mod site;
mod toast;

/// Hero particle field on `#hero-canvas`: pointer, page lifecycle and frame
/// loop. Pages without the canvas simply skip it.
fn init_hero_field(window: &web::Window, document: &web::Document) -> anyhow::Result<()> {
    let Some(canvas_el) = document.get_element_by_id("hero-canvas") else {
        log::info!("no #hero-canvas; particle field disabled");
        return Ok(());
    };
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let config = canvas::config_from_canvas(&canvas).unwrap_or_else(|e| {
        log::warn!("[field] ignoring canvas overrides: {}", e);
        Default::default()
    });
    let surface = canvas::CanvasSurface::new(canvas.clone())?;

    let tick: frame::FrameCallback = Rc::new(RefCell::new(None));
    let scheduler = frame::RafScheduler::new(window.clone(), tick.clone());
    let animator = animator::Animator::new(surface, scheduler, config, StdRng::from_entropy())?;
    let animator = Rc::new(RefCell::new(animator));

    events::wire_pointer_handlers(events::PointerWiring {
        canvas,
        animator: animator.clone(),
    });
    events::wire_page_lifecycle(window, document, animator.clone());

    frame::start_loop(animator, tick);
    Ok(())
}

fn init_page(window: &web::Window, document: &web::Document) {
    site::wire_loader(window, document);

    let header = document
        .get_element_by_id("header")
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
    if let Some(h) = &header {
        site::wire_header_scroll(window, h.clone().into());
    }
    if let Some(nav) = site::wire_mobile_nav(document) {
        events::wire_menu_escape(document, nav);
    }
    site::wire_smooth_scroll(document, header.clone());
    site::wire_counters(document);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-field starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    init_page(&window, &document);

    if let Err(e) = init_hero_field(&window, &document) {
        log::error!("[field] init error: {:?}", e);
    }

    let toaster = Rc::new(RefCell::new(Toaster::default()));
    contact::wire_contact_form(&document, toaster);

    if let Some(header) = document
        .get_element_by_id("header")
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        site::wire_active_link(&window, &document, header);
    }
    Ok(())
}
