//! Presentation side of the catalog: site paths, page contexts and renderers.
//!
//! Pages are built read-only from the [`CatalogStore`](crate::catalog::CatalogStore) and
//! rendered as plain text or JSON by the CLI.

pub mod render;
pub mod routes;
pub mod views;

pub use render::{format_page, render_json, render_text};
pub use routes::Route;
pub use views::{
    survivor_classes, DetailContext, HomeContext, ListContext, NotFoundContext, Page,
    SiteContext, Views,
};
