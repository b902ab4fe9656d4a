//! Record types for parsed projects and the published catalog file.
//!
//! Field names serialize in camelCase because the published JSON is read
//! directly by the site's front-end modules. `ProjectRecord` is what the
//! parser and asset scan produce; `PublishedProject` adds the presentation
//! defaults the renderers expect; `CatalogDocument` is the file on disk.

use crate::catalog::identity::{CatalogKey, Palette, ProjectId};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Longest body excerpt, in characters, carried into `chapters`.
pub const CHAPTER_EXCERPT_CHARS: usize = 120;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One project parsed from `projects/<id>.txt` plus its discovered assets.
pub struct ProjectRecord {
    pub id: ProjectId,
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub bodies: Vec<BodySection>,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(default)]
    pub model_path: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub assets: ProjectAssets,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// A `- Label:` / value pair from the metrics block.
pub struct Metric {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Chapter-like body section with inline asset references.
pub struct BodySection {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub assets: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Files found under `assets/<id>/`, each list sorted for stable output.
pub struct ProjectAssets {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Singleton "about" data parsed from `about/profile.txt`.
pub struct ProfileRecord {
    pub bio: String,
    pub skills: Vec<String>,
    pub profile_image: String,
}

impl ProjectRecord {
    /// Empty record for `id`; the title falls back to the id.
    pub fn placeholder(id: ProjectId) -> Self {
        Self {
            title: id.0.clone(),
            id,
            ..Default::default()
        }
    }

    /// Whether the renderer should load a model instead of its placeholder visual.
    pub fn has_model(&self) -> bool {
        !self.model_path.is_empty()
    }

    /// Short excerpts of each body used by the overview cards.
    pub fn chapters(&self) -> Vec<String> {
        self.bodies
            .iter()
            .map(|body| excerpt(&body.content, CHAPTER_EXCERPT_CHARS))
            .collect()
    }
}

fn excerpt(content: &str, limit: usize) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Catalog entry as written to `project-realms.json`.
pub struct PublishedProject {
    #[serde(flatten)]
    pub record: ProjectRecord,
    pub path: String,
    pub project_tag: String,
    pub theme: String,
    pub model_scale: f64,
    pub accent: String,
    pub secondary: String,
    pub impact: String,
    pub chapters: Vec<String>,
}

impl PublishedProject {
    /// Attach presentation defaults for a record shown at `position`.
    pub fn from_record(record: &ProjectRecord, position: usize) -> Self {
        let palette = Palette::for_position(position);
        Self {
            path: record.id.page_path(),
            project_tag: "Project".to_string(),
            theme: palette.theme.to_string(),
            model_scale: 1.0,
            accent: palette.accent.to_string(),
            secondary: palette.secondary.to_string(),
            impact: String::new(),
            chapters: record.chapters(),
            record: record.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// The published catalog file: display order plus entries keyed by id.
pub struct CatalogDocument {
    pub schema_version: CatalogKey,
    pub order: Vec<ProjectId>,
    pub projects: BTreeMap<ProjectId, PublishedProject>,
}

/// Read and parse a published catalog from disk without further validation.
pub fn load_catalog_from_path(path: &Path) -> Result<CatalogDocument> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let document: CatalogDocument =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(document)
}
