//! Shared library for the portfolio catalog builder.
//!
//! The crate turns the plain-text sources of a portfolio site
//! (`projects/*.txt`, `projects/order.txt`, `assets/<id>/`,
//! `about/profile.txt`) into the JSON data files its front-end reads. Public
//! functions here form the contract the `realm-build` and `realm-nav`
//! binaries depend on: site root discovery, document parsing, catalog
//! assembly and lookup, and publishing.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod assets;
pub mod catalog;
pub mod document;
pub mod schema;
pub mod site_build;

pub use assets::{ExternalLink, collect_assets};
pub use catalog::{
    AssetKind, BodySection, Catalog, CatalogDocument, Metric, Neighbors, ProfileRecord,
    ProjectAssets, ProjectId, ProjectRecord, PublishedProject, load_catalog_from_path,
};
pub use document::{parse_profile, parse_project, split_labels};
pub use schema::SchemaSet;
pub use site_build::{
    BuildOptions, BuildReport, SiteBuild, SiteLayout, assemble_site, build_site,
    discover_project_sources, read_order_file,
};

const ROOT_SENTINEL: &str = site_build::PROJECTS_DIR;

/// Returns true when `candidate` looks like a site root (has `projects/`).
fn is_site_root(candidate: &Path) -> bool {
    candidate.join(ROOT_SENTINEL).is_dir()
}

/// Accepts an explicit root hint only when it points at a real site.
fn site_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_site_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_site_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the site root.
///
/// Search order: `PORTFOLIO_ROOT` if it points at a site, then the working
/// directory and its ancestors, then the build-time hint. Callers treat
/// failure as fatal because nothing can be built without `projects/`.
pub fn find_site_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("PORTFOLIO_ROOT") {
        if let Some(root) = site_root_from_hint(&env_root) {
            return Ok(root);
        }
        log::warn!("PORTFOLIO_ROOT={env_root} has no projects/ directory; searching instead");
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(root) = search_upwards(&cwd) {
            return Ok(root);
        }
    }

    if let Some(hint) = option_env!("PORTFOLIO_ROOT_HINT") {
        if let Some(root) = site_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate the site root (a directory containing projects/). Set PORTFOLIO_ROOT or pass --root."
    );
}

/// Resolve an explicit `--root` value, falling back to discovery.
pub fn resolve_site_root(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => {
            if !is_site_root(path) {
                bail!(
                    "{} is not a site root: no {}/ directory",
                    path.display(),
                    ROOT_SENTINEL
                );
            }
            Ok(fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
        }
        None => find_site_root(),
    }
}
