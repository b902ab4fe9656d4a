//! Ordered, id-addressable view over project records.
//!
//! Building never fails: unknown ids in the explicit order are dropped and
//! lookups for unknown ids fall back to catalog ends. Loading a published
//! document goes through `from_document`, which is strict about the
//! order/entry invariant so renderers never consume a mismatched file.

use crate::catalog::identity::{CatalogKey, ProjectId};
use crate::catalog::model::{CatalogDocument, ProjectRecord, PublishedProject};
use anyhow::{Result, bail};
use std::collections::{BTreeMap, BTreeSet};

/// Schema key written into every published catalog.
pub const CATALOG_SCHEMA_VERSION: &str = "portfolio_catalog_v1";

/// Anything that can live in a catalog: it only needs to know its own id.
pub trait Keyed {
    fn key(&self) -> &ProjectId;
}

impl Keyed for ProjectRecord {
    fn key(&self) -> &ProjectId {
        &self.id
    }
}

impl Keyed for PublishedProject {
    fn key(&self) -> &ProjectId {
        &self.record.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Circular previous/next pair around a project.
pub struct Neighbors<'a, P> {
    pub previous: &'a P,
    pub next: &'a P,
}

#[derive(Debug, Clone, PartialEq)]
/// Display order plus a lookup map; `order` and `by_id` hold the same ids.
pub struct Catalog<P = ProjectRecord> {
    order: Vec<ProjectId>,
    by_id: BTreeMap<ProjectId, P>,
}

impl<P: Keyed> Catalog<P> {
    /// Assemble a catalog from records sorted by source file name.
    ///
    /// Ids named in `explicit_order` come first in listed order; everything
    /// else keeps its incoming order. Listed ids without a record are
    /// ignored, and a repeated record id keeps its first record.
    pub fn build(records: Vec<P>, explicit_order: Option<&[ProjectId]>) -> Self {
        let mut by_id: BTreeMap<ProjectId, P> = BTreeMap::new();
        let mut discovered: Vec<ProjectId> = Vec::with_capacity(records.len());
        for record in records {
            let id = record.key().clone();
            if by_id.contains_key(&id) {
                log::warn!("duplicate project id '{id}'; keeping the first record");
                continue;
            }
            discovered.push(id.clone());
            by_id.insert(id, record);
        }

        let mut order: Vec<ProjectId> = Vec::with_capacity(discovered.len());
        let mut placed: BTreeSet<ProjectId> = BTreeSet::new();
        for id in explicit_order.unwrap_or_default() {
            if !by_id.contains_key(id) {
                log::debug!("order list names '{id}' but no such project exists; ignoring");
                continue;
            }
            if placed.insert(id.clone()) {
                order.push(id.clone());
            }
        }
        for id in discovered {
            if placed.insert(id.clone()) {
                order.push(id);
            }
        }

        Self { order, by_id }
    }

    /// Record for `id`, or the first record in display order when `id` is
    /// unknown. `None` only for an empty catalog.
    pub fn get(&self, id: &ProjectId) -> Option<&P> {
        self.by_id.get(id).or_else(|| self.first())
    }

    /// Circular neighbors of `id`; an unknown id sits "between" the last and
    /// first entries. `None` only for an empty catalog.
    pub fn neighbors(&self, id: &ProjectId) -> Option<Neighbors<'_, P>> {
        let len = self.order.len();
        if len == 0 {
            return None;
        }
        let (previous, next) = match self.position(id) {
            Some(index) => (
                &self.order[(index + len - 1) % len],
                &self.order[(index + 1) % len],
            ),
            None => (&self.order[len - 1], &self.order[0]),
        };
        Some(Neighbors {
            previous: self.by_id.get(previous)?,
            next: self.by_id.get(next)?,
        })
    }

    /// Position of `id` in display order.
    pub fn position(&self, id: &ProjectId) -> Option<usize> {
        self.order.iter().position(|candidate| candidate == id)
    }

    /// Records in display order.
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    pub fn ids(&self) -> &[ProjectId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn first(&self) -> Option<&P> {
        self.order.first().and_then(|id| self.by_id.get(id))
    }
}

impl Catalog<ProjectRecord> {
    /// Serializable document with presentation defaults assigned by position.
    pub fn publish(&self) -> CatalogDocument {
        let projects = self
            .iter()
            .enumerate()
            .map(|(position, record)| {
                (
                    record.id.clone(),
                    PublishedProject::from_record(record, position),
                )
            })
            .collect();
        CatalogDocument {
            schema_version: CatalogKey(CATALOG_SCHEMA_VERSION.to_string()),
            order: self.order.clone(),
            projects,
        }
    }
}

impl Catalog<PublishedProject> {
    /// Rebuild a catalog from a published document.
    ///
    /// Rejects unknown schema versions, duplicate or dangling ids in `order`,
    /// entries missing from `order`, and entries whose `id` disagrees with
    /// their key.
    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        if document.schema_version.0 != CATALOG_SCHEMA_VERSION {
            bail!(
                "schema_version '{}' not supported (expected {})",
                document.schema_version.0,
                CATALOG_SCHEMA_VERSION
            );
        }

        let mut errors = Vec::new();
        let mut seen = BTreeSet::new();
        for id in &document.order {
            if !seen.insert(id) {
                errors.push(format!("order lists '{id}' more than once"));
            }
            if !document.projects.contains_key(id) {
                errors.push(format!("order lists '{id}' but no entry exists"));
            }
        }
        for (key, entry) in &document.projects {
            if !seen.contains(key) {
                errors.push(format!("entry '{key}' is missing from order"));
            }
            if entry.key() != key {
                errors.push(format!(
                    "entry keyed '{key}' declares id '{}'",
                    entry.key()
                ));
            }
        }
        if !errors.is_empty() {
            bail!("published catalog is inconsistent:\n{}", errors.join("\n"));
        }

        Ok(Self {
            order: document.order,
            by_id: document.projects,
        })
    }
}
