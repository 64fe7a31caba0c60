use locdir::cascade::OptionList;
use locdir::config::DeleteDialogIds;
use locdir::popup::DeleteRequest;
use locdir::{LocdirError, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement, HtmlOptionElement, HtmlSelectElement};

pub fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| LocdirError::missing_element("document"))
}

pub fn element(doc: &Document, id: &str) -> Result<Element> {
    doc.get_element_by_id(id).ok_or_else(|| LocdirError::missing_element(id))
}

pub fn select(doc: &Document, id: &str) -> Result<HtmlSelectElement> {
    element(doc, id)?.dyn_into::<HtmlSelectElement>().map_err(|_| LocdirError::missing_element(id))
}

/// Replaces every option of `select` with `list`, in order, in one synchronous pass.
pub fn render_options(select: &HtmlSelectElement, list: &OptionList) -> std::result::Result<(), JsValue> {
    select.set_inner_html("");
    for o in &list.options {
        let opt = HtmlOptionElement::new_with_text_and_value(&o.label, &o.value)?;
        select.append_child(&opt)?;
    }
    Ok(())
}

/// Fills the confirmation dialog for `req` and shows it.
pub fn show_delete_dialog(doc: &Document, ids: &DeleteDialogIds, req: &DeleteRequest) -> Result<()> {
    element(doc, &ids.name)?.set_text_content(Some(&req.name));
    let form = element(doc, &ids.form)?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| LocdirError::missing_element(ids.form.clone()))?;
    form.set_action(&req.action);
    let modal_el = element(doc, &ids.modal)?;
    match crate::gmaps::BootstrapModal::new(&modal_el) {
        Ok(modal) => modal.show(),
        Err(_) => crate::log::warn("bootstrap.Modal is not available; delete dialog not shown"),
    }
    Ok(())
}
