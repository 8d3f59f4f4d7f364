use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Event, FormData, HtmlFormElement};

use crate::contact::{ContactSubmission, FormKind};

/// Intercept `submit` on every `form[data-mailto-form]` and open the mail
/// client with the composed message instead.
pub fn wire_forms(document: &Document) -> Result<(), JsValue> {
    let forms = document.query_selector_all("form[data-mailto-form]")?;
    for i in 0..forms.length() {
        let Some(form) = forms
            .item(i)
            .and_then(|node| node.dyn_into::<HtmlFormElement>().ok())
        else {
            continue;
        };
        let attr = form.get_attribute("data-mailto-form").unwrap_or_default();
        let Some(kind) = FormKind::from_attr(&attr) else {
            log::warn!("unknown mailto form kind {attr:?}");
            continue;
        };

        let handler = {
            let form = form.clone();
            Closure::wrap(Box::new(move |event: Event| {
                event.prevent_default();
                if let Err(e) = submit(&form, kind) {
                    log::error!("form hand-off failed: {:?}", e);
                }
            }) as Box<dyn FnMut(Event)>)
        };
        form.add_event_listener_with_callback("submit", handler.as_ref().unchecked_ref())?;
        // Listener lives as long as the page.
        handler.forget();
    }
    Ok(())
}

fn submit(form: &HtmlFormElement, kind: FormKind) -> Result<(), JsValue> {
    let data = FormData::new_with_form(form)?;
    let submission = match ContactSubmission::from_fields(kind, |key| data.get(key).as_string()) {
        Ok(submission) => submission,
        Err(e) => {
            log::warn!("{e}");
            return Ok(());
        }
    };
    let href = submission.compose().mailto_href();
    let window = web_sys::window().ok_or("no window")?;
    window.location().set_href(&href)?;
    Ok(())
}
