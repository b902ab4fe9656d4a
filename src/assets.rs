//! Asset discovery for `assets/<id>/` folders.
//!
//! Files are bucketed by extension into images, videos, and documents; the
//! optional `links.txt` sidecar becomes the project's raw link list. Missing
//! folders are normal (most projects have none) and yield an empty set.

use crate::catalog::{AssetKind, ProjectAssets, ProjectId};
use crate::document::read_source_text;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Sidecar holding one external link per line; never listed as an asset.
pub const LINKS_FILE: &str = "links.txt";

/// Scan `assets_root/<id>/` and return its sorted asset lists.
pub fn collect_assets(assets_root: &Path, id: &ProjectId) -> Result<ProjectAssets> {
    let dir = assets_root.join(id.as_str());
    let mut assets = ProjectAssets::default();
    if !dir.is_dir() {
        return Ok(assets);
    }

    for entry in fs::read_dir(&dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("{id}: skipping asset with non UTF-8 name: {}", path.display());
            continue;
        };
        if name == LINKS_FILE {
            assets.links = read_links(&path)?;
            continue;
        }
        match AssetKind::from_file_name(name) {
            AssetKind::Image => assets.images.push(name.to_string()),
            AssetKind::Video => assets.videos.push(name.to_string()),
            AssetKind::Document => assets.documents.push(name.to_string()),
            AssetKind::Other(ext) => {
                log::debug!("{id}: ignoring asset {name} (unsupported extension {ext:?})")
            }
        }
    }

    assets.images.sort();
    assets.videos.sort();
    assets.documents.sort();
    Ok(assets)
}

fn read_links(path: &Path) -> Result<Vec<String>> {
    let raw = read_source_text(path)?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

static LABELED_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?):\s*(https?://\S+)$").expect("built-in link pattern must compile")
});

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// A `links.txt` entry resolved into something a renderer can show.
pub struct ExternalLink {
    pub label: String,
    pub href: String,
}

impl ExternalLink {
    /// Resolve `Label: https://…` entries; anything else links to itself and
    /// is labeled by its host (without `www.`) or, failing that, verbatim.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(caps) = LABELED_LINK.captures(raw) {
            return Self {
                label: caps[1].trim().to_string(),
                href: caps[2].to_string(),
            };
        }
        let label = url_host(raw)
            .map(|host| host.strip_prefix("www.").unwrap_or(host).to_string())
            .unwrap_or_else(|| raw.to_string());
        Self {
            label,
            href: raw.to_string(),
        }
    }
}

fn url_host(raw: &str) -> Option<&str> {
    let (_, rest) = raw.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit('@').next()?;
    let host = host_port.split(':').next()?;
    if host.is_empty() { None } else { Some(host) }
}
