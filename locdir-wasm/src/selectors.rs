use crate::dom;
use gloo_net::http::Request;
use locdir::cascade::{Cascade, CascadeChange, FetchRequest, Level, OptionList};
use locdir::{LocdirError, OptionEntry, SelectorConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlSelectElement};

/// Region, city and district selects plus the ticket state that orders their updates.
pub struct Selectors {
    cascade: RefCell<Cascade>,
    region: HtmlSelectElement,
    city: HtmlSelectElement,
    district: HtmlSelectElement,
}

impl Selectors {
    pub fn bind(doc: &Document, config: SelectorConfig) -> locdir::Result<Rc<Self>> {
        let region = dom::select(doc, &config.region_id)?;
        let city = dom::select(doc, &config.city_id)?;
        let district = dom::select(doc, &config.district_id)?;
        Ok(Rc::new(Selectors { cascade: RefCell::new(Cascade::new(config)), region, city, district }))
    }

    fn target(&self, level: Level) -> &HtmlSelectElement {
        match level {
            Level::City => &self.city,
            Level::District => &self.district,
        }
    }

    fn render(&self, list: &OptionList) {
        if let Err(e) = dom::render_options(self.target(list.level), list) {
            crate::log::warn(&format!("failed to render {:?} options: {:?}", list.level, e));
        }
    }

    fn apply(self: &Rc<Self>, change: CascadeChange) {
        for list in &change.resets {
            self.render(list);
        }
        if let Some(req) = change.fetch {
            let this = Rc::clone(self);
            spawn_local(async move {
                match fetch_entries(&req).await {
                    Ok(entries) => {
                        let list = this.cascade.borrow().apply_response(&req, &entries);
                        if let Some(list) = list {
                            this.render(&list);
                        }
                    }
                    // Prior options stay in place.
                    Err(e) => crate::log::warn(&e.to_string()),
                }
            });
        }
    }

    pub fn on_region_change(self: &Rc<Self>) {
        let change = self.cascade.borrow_mut().on_region_change(&self.region.value());
        self.apply(change);
    }

    pub fn on_city_change(self: &Rc<Self>) {
        let change = self.cascade.borrow_mut().on_city_change(&self.city.value());
        self.apply(change);
    }

    /// Attaches the change listeners for the lifetime of the page.
    pub fn listen(self: &Rc<Self>) -> Result<(), JsValue> {
        let this = Rc::clone(self);
        let on_region = Closure::wrap(Box::new(move || this.on_region_change()) as Box<dyn FnMut()>);
        self.region.add_event_listener_with_callback("change", on_region.as_ref().unchecked_ref())?;
        on_region.forget();

        let this = Rc::clone(self);
        let on_city = Closure::wrap(Box::new(move || this.on_city_change()) as Box<dyn FnMut()>);
        self.city.add_event_listener_with_callback("change", on_city.as_ref().unchecked_ref())?;
        on_city.forget();
        Ok(())
    }
}

async fn fetch_entries(req: &FetchRequest) -> locdir::Result<Vec<OptionEntry>> {
    let failed = |message: String| LocdirError::Fetch { url: req.url(), message };
    let resp = Request::get(&req.endpoint)
        .query(req.query())
        .send()
        .await
        .map_err(|e| failed(e.to_string()))?;
    if !resp.ok() {
        return Err(failed(format!("HTTP {}", resp.status())));
    }
    resp.json::<Vec<OptionEntry>>().await.map_err(|e| failed(e.to_string()))
}

/// Wires the selectors now, or on `DOMContentLoaded` while the document is still loading.
pub fn init(config: SelectorConfig) -> locdir::Result<()> {
    let doc = dom::document()?;
    if doc.ready_state() == "loading" {
        let d = doc.clone();
        let on_ready = Closure::once_into_js(move || {
            if let Err(e) = wire(&d, config) {
                crate::log::warn(&e.to_string());
            }
        });
        doc.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .map_err(|e| LocdirError::invalid_config(format!("cannot listen for DOMContentLoaded: {:?}", e)))?;
        return Ok(());
    }
    wire(&doc, config)
}

fn wire(doc: &Document, config: SelectorConfig) -> locdir::Result<()> {
    let selectors = Selectors::bind(doc, config)?;
    selectors
        .listen()
        .map_err(|e| LocdirError::invalid_config(format!("cannot attach change listeners: {:?}", e)))
}
