use crate::constants::FORM_SUBMIT_DELAY_MS;
use crate::core::{NoticeKind, Toaster};
use crate::{dom, toast};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const SENDING_LABEL: &str = "<span>送信中...</span>";
const THANKS_MESSAGE: &str =
    "お問い合わせありがとうございます。内容を確認次第、ご連絡いたします。";
const FAILED_MESSAGE: &str = "送信に失敗しました。時間をおいて再度お試しください。";

/// Mocked submission: no request leaves the page.
pub fn wire_contact_form(document: &web::Document, toaster: Rc<RefCell<Toaster>>) {
    let Some(form) = document
        .get_element_by_id("contact-form")
        .and_then(|el| el.dyn_into::<web::HtmlFormElement>().ok())
    else {
        return;
    };
    let doc = document.clone();
    let form_submit = form.clone();
    dom::add_listener(&form, "submit", move |ev| {
        ev.prevent_default();
        let button = form_submit
            .query_selector("button[type=\"submit\"]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web::HtmlButtonElement>().ok());
        let original_label = button.as_ref().map(|b| b.inner_html());
        if let Some(b) = &button {
            b.set_disabled(true);
            b.set_inner_html(SENDING_LABEL);
        }

        let doc = doc.clone();
        let form = form_submit.clone();
        let toaster = toaster.clone();
        spawn_local(async move {
            match dom::sleep_ms(FORM_SUBMIT_DELAY_MS).await {
                Ok(()) => {
                    toast::show(&doc, &toaster, THANKS_MESSAGE, NoticeKind::Success);
                    form.reset();
                }
                Err(e) => {
                    log::warn!("[contact] submit failed: {:?}", e);
                    toast::show(&doc, &toaster, FAILED_MESSAGE, NoticeKind::Error);
                }
            }
            if let (Some(b), Some(label)) = (&button, &original_label) {
                b.set_disabled(false);
                b.set_inner_html(label);
            }
        });
    });
}
