//! # ror2wiki - Risk of Rain 2 Catalog
//!
//! A catalog of Risk of Rain 2 survivors, monsters and items. Data comes from three
//! delimited source files, is loaded into an embedded sled store by an idempotent
//! importer, and is browsed through read-only list and detail pages.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ror2wiki::catalog::{CatalogStore, Importer, Survivor};
//! use ror2wiki::config::Config;
//! use ror2wiki::web::{render_text, Views};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let store = CatalogStore::open(config.db_path())?;
//!
//!     // Create any records whose names are not stored yet
//!     let summary = Importer::new(&store).import_all(&config.import.sources())?;
//!     println!("{} records created", summary.total_created());
//!
//!     // Look one up and render its detail page
//!     let commando: Survivor = store.get("Commando")?;
//!     println!("{} ({})", commando.name, commando.class);
//!     let views = Views::new(&store, &config.catalog.name);
//!     println!("{}", render_text(&views.page("/survivors/")?));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`catalog`] - record types, the sled store and the importer
//! - [`web`] - site paths, page contexts and text/JSON rendering
//! - [`config`] - TOML configuration
//! - [`validation`] - source header and field checks
//! - [`logutil`] - single-line escaping for log output
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Source files   │ ← monster / item / survivor CSV
//! └─────────────────┘
//!          │ Importer (create-if-absent)
//! ┌─────────────────┐
//! │  Catalog Store  │ ← sled trees, one per collection
//! └─────────────────┘
//!          │ list / get / survivor classes
//! ┌─────────────────┐
//! │     Views       │ ← page contexts, text or JSON
//! └─────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod logutil;
pub mod validation;
pub mod web;
