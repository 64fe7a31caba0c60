pub mod model;
pub mod config;
pub mod error;
pub mod limits;
pub mod geometry {
    pub mod bounds;
}
pub mod popup;
pub mod map;
pub mod cascade;
pub mod catalog;

pub use config::{DeleteDialogIds, MapConfig, SelectorConfig};
pub use error::{LocdirError, Result};
pub use geometry::bounds::{Bounds, Viewport};
pub use map::{GeolocationFailure, MapController, MapEvent, MapOutcome, MapState, MapSurface, MarkerKey, PopupSession};
pub use model::{LatLng, Location, OptionEntry, RecordId};
