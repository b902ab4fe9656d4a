//! Project catalog wiring.
//!
//! `model` holds the record types and the published file shape, `identity`
//! the small value types (ids, asset kinds, palettes), and `index` the
//! ordered `Catalog` with lookup and circular neighbor queries.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{AssetKind, CatalogKey, PALETTES, Palette, ProjectId};
pub use index::{CATALOG_SCHEMA_VERSION, Catalog, Keyed, Neighbors};
pub use model::{
    BodySection, CatalogDocument, Metric, ProfileRecord, ProjectAssets, ProjectRecord,
    PublishedProject,
};

pub use model::load_catalog_from_path;
