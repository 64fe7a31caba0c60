use crate::config::MapConfig;
use crate::model::{Location, RecordId};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Class of the Delete button inside popup markup; the browser layer binds to it.
pub const DELETE_BUTTON_CLASS: &str = "delete-location-btn";

/// What the delete confirmation dialog must show once Delete is clicked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: RecordId,
    pub name: String,
    /// New `action` of the shared delete form, e.g. `/delete/7`.
    pub action: String,
}

impl DeleteRequest {
    pub fn for_location(loc: &Location, cfg: &MapConfig) -> Self {
        DeleteRequest { id: loc.id.clone(), name: loc.name.clone(), action: cfg.delete_action(&loc.id) }
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Info window markup for one location.
pub fn render_popup(loc: &Location, cfg: &MapConfig) -> String {
    let id = escape_html(&loc.id.to_string());
    let name = escape_html(&loc.name);
    let mut html = String::new();
    html.push_str("<div class=\"info-window\">");
    let _ = write!(html, "<h5>{}</h5>", name);
    let _ = write!(html, "<p class=\"text-muted\">{}</p>", escape_html(&loc.category));
    let _ = write!(html, "<p>{}</p>", escape_html(&loc.description));
    html.push_str("<div class=\"d-flex justify-content-end\">");
    let _ = write!(
        html,
        "<a href=\"{}\" class=\"btn btn-sm btn-outline-primary me-2\">Edit</a>",
        escape_html(&cfg.edit_href(&loc.id))
    );
    let _ = write!(
        html,
        "<button class=\"btn btn-sm btn-outline-danger {}\" data-id=\"{}\" data-name=\"{}\">Delete</button>",
        DELETE_BUTTON_CLASS, id, name
    );
    html.push_str("</div></div>");
    html
}

/// Markup of the custom "fit to all locations" map control.
pub fn render_fit_control(cfg: &MapConfig) -> String {
    format!(
        "<button class=\"btn btn-dark btn-sm map-control-btn\" title=\"{}\"><i class=\"fas fa-expand-arrows-alt\"></i></button>",
        escape_html(&cfg.fit_control_title)
    )
}
