use crate::constants::{TOAST_AUTO_DISMISS_MS, TOAST_SLIDE_OUT_MS};
use crate::core::{
    NoticeKind, Toaster, NOTIFICATION_STYLES, NOTIFICATION_STYLES_ID, SLIDE_OUT_ANIMATION,
};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

const SUCCESS_ICON: &str = "<path d=\"M22 11.08V12a10 10 0 1 1-5.93-9.14\"/><path d=\"M22 4L12 14.01l-3-3\"/>";
const ALERT_ICON: &str = "<circle cx=\"12\" cy=\"12\" r=\"10\"/><path d=\"M12 8v4M12 16h.01\"/>";

/// Show a toast, replacing any toast already on screen.
pub fn show(
    document: &web::Document,
    toaster: &Rc<RefCell<Toaster>>,
    message: &str,
    kind: NoticeKind,
) {
    if let Ok(Some(existing)) = document.query_selector(".notification") {
        existing.remove();
    }
    let (id, replaced) = toaster.borrow_mut().show();
    if let Some(old) = replaced {
        log::debug!("[toast] {} replaced by {}", old, id);
    }

    let el = match build(document, message, kind) {
        Ok(el) => el,
        Err(e) => {
            log::error!("[toast] build error: {:?}", e);
            toaster.borrow_mut().dismiss(id);
            return;
        }
    };
    ensure_styles(document);
    let Some(body) = document.body() else {
        return;
    };
    if let Err(e) = body.append_child(&el) {
        log::error!("[toast] append error: {:?}", e);
        return;
    }

    if let Ok(Some(close)) = el.query_selector(".notification-close") {
        let toaster_close = toaster.clone();
        let el_close = el.clone();
        dom::add_click_listener(&close, move |_| {
            if toaster_close.borrow_mut().dismiss(id) {
                slide_out(el_close.clone());
            }
        });
    }

    let toaster_auto = toaster.clone();
    dom::set_timeout(TOAST_AUTO_DISMISS_MS, move || {
        if toaster_auto.borrow_mut().dismiss(id) && el.parent_node().is_some() {
            slide_out(el);
        }
    });
}

fn build(
    document: &web::Document,
    message: &str,
    kind: NoticeKind,
) -> Result<web::Element, wasm_bindgen::JsValue> {
    let el = document.create_element("div")?;
    el.set_class_name(kind.class_name());
    let icon = match kind {
        NoticeKind::Success => SUCCESS_ICON,
        NoticeKind::Error | NoticeKind::Info => ALERT_ICON,
    };
    el.set_inner_html(&format!(
        "<div class=\"notification-content\">\
         <svg class=\"notification-icon\" viewBox=\"0 0 24 24\" fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\">{}</svg>\
         <span class=\"notification-message\"></span>\
         </div>\
         <button class=\"notification-close\" aria-label=\"閉じる\">&times;</button>",
        icon
    ));
    // message goes in as text, never markup
    if let Some(span) = el.query_selector(".notification-message")? {
        span.set_text_content(Some(message));
    }
    Ok(el)
}

/// Add the toast stylesheet to `<head>` unless an earlier toast already did.
fn ensure_styles(document: &web::Document) {
    if document.get_element_by_id(NOTIFICATION_STYLES_ID).is_some() {
        return;
    }
    let Some(head) = document.head() else {
        log::warn!("[toast] no <head>; notification styles not injected");
        return;
    };
    let sheet = match document.create_element("style") {
        Ok(el) => el,
        Err(e) => {
            log::error!("[toast] style element error: {:?}", e);
            return;
        }
    };
    sheet.set_id(NOTIFICATION_STYLES_ID);
    sheet.set_text_content(Some(NOTIFICATION_STYLES));
    if let Err(e) = head.append_child(&sheet) {
        log::error!("[toast] style append error: {:?}", e);
    }
}

fn slide_out(el: web::Element) {
    _ = el.set_attribute("style", SLIDE_OUT_ANIMATION);
    dom::set_timeout(TOAST_SLIDE_OUT_MS, move || el.remove());
}
