//! Clipboard access.
//!
//! The async Clipboard API only exists in secure contexts. Dashboards
//! opened over plain HTTP on a LAN address fall back to a hidden textarea
//! and `execCommand("copy")`.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement, Window};

pub async fn copy_text(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    if window.is_secure_context() {
        let promise: js_sys::Promise = window.navigator().clipboard().write_text(text);
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| format!("{e:?}"))
    } else {
        copy_with_textarea(&window, text)
    }
}

fn copy_with_textarea(window: &Window, text: &str) -> Result<(), String> {
    let document = window.document().ok_or("no document")?;
    let body = document.body().ok_or("no body")?;

    let textarea: HtmlTextAreaElement = document
        .create_element("textarea")
        .map_err(|e| format!("{e:?}"))?
        .unchecked_into();
    textarea.set_value(text);
    let _ = textarea.set_attribute("readonly", "");
    let _ = textarea.set_attribute("style", "position:fixed;top:0;left:0;opacity:0");
    body.append_child(&textarea).map_err(|e| format!("{e:?}"))?;
    textarea.select();

    let copied = document
        .unchecked_ref::<HtmlDocument>()
        .exec_command("copy")
        .map_err(|e| format!("{e:?}"));
    let _ = body.remove_child(&textarea);

    match copied? {
        true => Ok(()),
        false => Err("execCommand(\"copy\") was rejected".into()),
    }
}
