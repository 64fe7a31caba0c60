mod api;
pub mod dom;
mod error;
mod gmaps;
mod interop;
mod log;
mod selectors;
mod surface;

pub use api::{filter_locations, init_selectors, location_categories, search_locations, set_panic_hook, MapView};
