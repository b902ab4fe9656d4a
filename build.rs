//! Records a fallback site root for binaries run outside any site.
//!
//! The hint is the first candidate that actually holds a `projects/`
//! directory: an explicit `PORTFOLIO_ROOT_HINT`, then `PORTFOLIO_ROOT`, then
//! the crate directory and its ancestors (for a checkout kept inside the
//! site, e.g. `<site>/tools/realm-catalog`). Nothing is recorded otherwise.

use std::env;
use std::path::{Path, PathBuf};

fn looks_like_site(dir: &Path) -> bool {
    dir.join("projects").is_dir()
}

fn main() {
    println!("cargo:rerun-if-env-changed=PORTFOLIO_ROOT_HINT");
    println!("cargo:rerun-if-env-changed=PORTFOLIO_ROOT");

    let mut candidates: Vec<PathBuf> = ["PORTFOLIO_ROOT_HINT", "PORTFOLIO_ROOT"]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .collect();
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        candidates.extend(Path::new(&manifest_dir).ancestors().map(Path::to_path_buf));
    }

    if let Some(site) = candidates.into_iter().find(|dir| looks_like_site(dir)) {
        let canonical = site.canonicalize().unwrap_or(site);
        println!(
            "cargo:rustc-env=PORTFOLIO_ROOT_HINT={}",
            canonical.display()
        );
    }
}
