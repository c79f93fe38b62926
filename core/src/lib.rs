//! Catalog logic behind the Aniting app showcase: the composite AniList
//! query, its typed decoding, and the GUI-free parts of the showcase widget.

mod api;
mod models;

pub mod animation;
pub mod display;
pub mod loader;
pub mod query;
pub mod showcase;

pub use api::{decode_showcase, CatalogClient, FetchError};
pub use loader::{spawn_catalog_fetch, FetchHandle};
pub use models::*;
pub use showcase::{LoadingState, ShowcaseSession};
