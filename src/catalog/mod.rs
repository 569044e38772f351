//! Body catalog module
//!
//! This module holds the immutable body descriptor table, the identifier-keyed
//! presentation traits, and optional loading of the table from a config file.

pub mod defaults;
pub mod loader;
pub mod traits;
pub mod types;

pub use defaults::default_catalog;
pub use loader::{CatalogSource, load_catalog};
pub use traits::{SUN_ROTATION_SPEED, body_traits};
pub use types::{BodyCatalog, BodyDescriptor, Rgb8};
