//! The build pipeline: discover source documents, parse, assemble, publish.
//!
//! Every document and the order sidecar are read before anything is
//! ordered, because the explicit order only makes sense against the full id
//! set. Output files are written through a temp file in the output directory
//! and renamed into place so the dev server never sees a half-written file.

use crate::assets::collect_assets;
use crate::catalog::{Catalog, ProfileRecord, ProjectId, ProjectRecord};
use crate::document::{parse_profile, parse_project, read_source_text};
use crate::schema::SchemaSet;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const PROJECTS_DIR: &str = "projects";
pub const ASSETS_DIR: &str = "assets";
pub const ABOUT_DIR: &str = "about";
pub const OUTPUT_DIR: &str = "src/data";
pub const ORDER_FILE: &str = "order.txt";
pub const PROFILE_FILE: &str = "profile.txt";
pub const CATALOG_OUTPUT: &str = "project-realms.json";
pub const PROFILE_OUTPUT: &str = "about-data.json";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where a site keeps its sources and where published data goes.
pub struct SiteLayout {
    pub root: PathBuf,
    pub projects_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub about_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl SiteLayout {
    /// Conventional layout anchored at `root`.
    pub fn at_root(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            projects_dir: root.join(PROJECTS_DIR),
            assets_dir: root.join(ASSETS_DIR),
            about_dir: root.join(ABOUT_DIR),
            output_dir: root.join(OUTPUT_DIR),
        }
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn order_file(&self) -> PathBuf {
        self.projects_dir.join(ORDER_FILE)
    }

    pub fn profile_file(&self) -> PathBuf {
        self.about_dir.join(PROFILE_FILE)
    }
}

#[derive(Debug, Clone, Default)]
/// Knobs for a single build run.
pub struct BuildOptions {
    pub skip_validation: bool,
    /// Load schemas from this directory instead of the bundled copies.
    pub schema_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
/// A project source document found under `projects/`.
pub struct ProjectSource {
    pub id: ProjectId,
    pub path: PathBuf,
}

/// List every `*.txt` project document except the order sidecar, sorted by
/// file name.
///
/// A missing `projects/` directory is fatal; an empty one is not.
pub fn discover_project_sources(projects_dir: &Path) -> Result<Vec<ProjectSource>> {
    if !projects_dir.is_dir() {
        bail!(
            "projects directory not found at {}",
            projects_dir.display()
        );
    }

    let mut results: BTreeMap<String, ProjectSource> = BTreeMap::new();
    for entry in fs::read_dir(projects_dir)
        .with_context(|| format!("listing {}", projects_dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name == ORDER_FILE {
            continue;
        }
        if let Some(id) = ProjectId::from_source_path(&path) {
            results.insert(file_name.to_string(), ProjectSource { id, path });
        }
    }

    Ok(results.into_values().collect())
}

/// Read the explicit order sidecar: ids one per line, blanks dropped.
/// Returns `None` when the file does not exist.
pub fn read_order_file(path: &Path) -> Result<Option<Vec<ProjectId>>> {
    if !path.is_file() {
        return Ok(None);
    }
    let raw = read_source_text(path)?;
    Ok(Some(parse_order_list(&raw)))
}

pub fn parse_order_list(raw: &str) -> Vec<ProjectId> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| ProjectId(line.to_string()))
        .collect()
}

#[derive(Debug, Clone)]
/// Everything one build produces, before it is written anywhere.
pub struct SiteBuild {
    pub catalog: Catalog,
    pub profile: Option<ProfileRecord>,
}

/// Read every source under `layout` and assemble the catalog and profile.
pub fn assemble_site(layout: &SiteLayout) -> Result<SiteBuild> {
    let sources = discover_project_sources(&layout.projects_dir)?;
    if sources.is_empty() {
        log::warn!(
            "no project documents found in {}; publishing an empty catalog",
            layout.projects_dir.display()
        );
    }

    let mut documents = Vec::with_capacity(sources.len());
    for source in &sources {
        documents.push((source, read_source_text(&source.path)?));
    }
    let explicit_order = read_order_file(&layout.order_file())?;

    let mut records: Vec<ProjectRecord> = Vec::with_capacity(documents.len());
    for (source, text) in documents {
        let mut record = parse_project(source.id.clone(), &text);
        record.assets = collect_assets(&layout.assets_dir, &source.id)?;
        log::debug!(
            "parsed {}: {} metric(s), {} body section(s), model: {}",
            source.path.display(),
            record.metrics.len(),
            record.bodies.len(),
            if record.has_model() { "yes" } else { "no" }
        );
        records.push(record);
    }

    let catalog = Catalog::build(records, explicit_order.as_deref());

    let profile_path = layout.profile_file();
    let profile = if profile_path.is_file() {
        Some(parse_profile(&read_source_text(&profile_path)?))
    } else {
        log::debug!("no profile at {}; skipping about data", profile_path.display());
        None
    };

    Ok(SiteBuild { catalog, profile })
}

#[derive(Debug, Clone, Serialize)]
/// Summary of a finished build.
pub struct BuildReport {
    pub order: Vec<ProjectId>,
    pub catalog_path: PathBuf,
    pub profile_path: Option<PathBuf>,
}

/// Assemble the site, validate the published documents, and write them.
pub fn build_site(layout: &SiteLayout, options: &BuildOptions) -> Result<BuildReport> {
    let site = assemble_site(layout)?;
    publish_site(&site, layout, options)
}

/// Validate and write an assembled site into `layout.output_dir`.
pub fn publish_site(
    site: &SiteBuild,
    layout: &SiteLayout,
    options: &BuildOptions,
) -> Result<BuildReport> {
    let document = site.catalog.publish();

    if options.skip_validation {
        log::debug!("schema validation disabled");
    } else {
        let schemas = match &options.schema_dir {
            Some(dir) => SchemaSet::from_dir(dir)?,
            None => SchemaSet::bundled()?,
        };
        schemas
            .catalog
            .validate(&document)
            .context("published catalog rejected")?;
        if let Some(profile) = &site.profile {
            schemas
                .profile
                .validate(profile)
                .context("published profile rejected")?;
        }
    }

    fs::create_dir_all(&layout.output_dir)
        .with_context(|| format!("creating {}", layout.output_dir.display()))?;

    let catalog_path = layout.output_dir.join(CATALOG_OUTPUT);
    write_json_atomically(&catalog_path, &document)?;

    let profile_path = match &site.profile {
        Some(profile) => {
            let path = layout.output_dir.join(PROFILE_OUTPUT);
            write_json_atomically(&path, profile)?;
            Some(path)
        }
        None => None,
    };

    Ok(BuildReport {
        order: site.catalog.ids().to_vec(),
        catalog_path,
        profile_path,
    })
}

fn write_json_atomically<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let dir = path
        .parent()
        .with_context(|| format!("{} has no parent directory", path.display()))?;
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    serde_json::to_writer_pretty(&mut file, value)
        .with_context(|| format!("serializing {}", path.display()))?;
    file.write_all(b"\n")?;
    file.persist(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site_with_projects(names: &[&str]) -> TempDir {
        let temp = TempDir::new().expect("temp dir");
        let projects = temp.path().join(PROJECTS_DIR);
        fs::create_dir_all(&projects).unwrap();
        for name in names {
            fs::write(projects.join(name), "Title:\nSomething\n").unwrap();
        }
        temp
    }

    #[test]
    fn discovery_skips_order_file_and_other_extensions() {
        let temp = site_with_projects(&["b.txt", "a.txt", "order.txt", "notes.md"]);
        fs::create_dir_all(temp.path().join(PROJECTS_DIR).join("dir.txt")).unwrap();
        let sources = discover_project_sources(&temp.path().join(PROJECTS_DIR)).unwrap();
        let ids: Vec<&str> = sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn discovery_sorts_by_file_name_not_id() {
        let temp = site_with_projects(&["a.txt", "a-b.txt"]);
        let sources = discover_project_sources(&temp.path().join(PROJECTS_DIR)).unwrap();
        let ids: Vec<&str> = sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a-b", "a"]);
    }

    #[test]
    fn missing_projects_dir_is_fatal() {
        let temp = TempDir::new().unwrap();
        let err = discover_project_sources(&temp.path().join(PROJECTS_DIR)).unwrap_err();
        assert!(err.to_string().contains("projects directory not found"));
    }

    #[test]
    fn order_list_trims_and_drops_blank_lines() {
        let ids = parse_order_list("  enemy-ai \n\n finance \r\n");
        assert_eq!(
            ids,
            vec![ProjectId("enemy-ai".into()), ProjectId("finance".into())]
        );
    }

    #[test]
    fn missing_order_file_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(read_order_file(&temp.path().join(ORDER_FILE)).unwrap().is_none());
    }

    #[test]
    fn empty_projects_dir_publishes_empty_catalog() {
        let temp = site_with_projects(&[]);
        let layout = SiteLayout::at_root(temp.path());
        let report = build_site(&layout, &BuildOptions::default()).unwrap();
        assert!(report.order.is_empty());
        assert!(report.profile_path.is_none());
        let written = fs::read_to_string(&report.catalog_path).unwrap();
        assert!(written.contains("\"order\": []"));
    }

    #[test]
    fn invalid_utf8_in_sources_is_replaced_not_fatal() {
        let temp = site_with_projects(&["good.txt"]);
        let layout = SiteLayout::at_root(temp.path());
        fs::write(
            layout.projects_dir.join("bad.txt"),
            b"Title:\nCaf\x92 Project\n",
        )
        .unwrap();
        fs::create_dir_all(layout.assets_dir.join("bad")).unwrap();
        fs::write(
            layout.assets_dir.join("bad").join("links.txt"),
            b"Caf\x92: https://example.com/menu\n",
        )
        .unwrap();
        fs::create_dir_all(layout.profile_file().parent().unwrap()).unwrap();
        fs::write(layout.profile_file(), b"Bio:\nOl\xe9 there\n").unwrap();

        let built = assemble_site(&layout).unwrap();
        let bad = built.catalog.get(&ProjectId("bad".into())).unwrap();
        assert_eq!(bad.title, "Caf\u{FFFD} Project");
        assert_eq!(bad.assets.links, vec!["Caf\u{FFFD}: https://example.com/menu"]);
        assert_eq!(built.profile.unwrap().bio, "Ol\u{FFFD} there");

        let report = build_site(&layout, &BuildOptions::default()).unwrap();
        assert_eq!(report.order.len(), 2);
    }
}
