//! JSON Schema checks for the published data files.
//!
//! The catalog and profile schemas ship inside the binary so a build can
//! validate its output without the source tree; `SchemaSet::from_dir` lets a
//! site pin its own copies instead.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

const CATALOG_SCHEMA: &str = include_str!("../schema/catalog.schema.json");
const PROFILE_SCHEMA: &str = include_str!("../schema/profile.schema.json");

pub const CATALOG_SCHEMA_FILE: &str = "catalog.schema.json";
pub const PROFILE_SCHEMA_FILE: &str = "profile.schema.json";

/// A compiled schema plus the name used in error messages.
pub struct PublishedSchema {
    name: String,
    compiled: JSONSchema,
}

impl PublishedSchema {
    fn compile(name: &str, raw: &Value) -> Result<Self> {
        let compiled = JSONSchema::compile(raw)
            .map_err(|err| anyhow!("compiling {name} schema: {err}"))?;
        Ok(Self {
            name: name.to_string(),
            compiled,
        })
    }

    fn from_str(name: &str, raw: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(raw).with_context(|| format!("parsing {name} schema"))?;
        Self::compile(name, &value)
    }

    fn from_path(path: &Path) -> Result<Self> {
        let value: Value = serde_json::from_reader(
            File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
        )
        .with_context(|| format!("parsing schema {}", path.display()))?;
        Self::compile(&path.display().to_string(), &value)
    }

    /// Validate an already-serialized document, reporting every violation.
    pub fn validate_value(&self, value: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(value) {
            let details = errors
                .map(|err| format!("{}: {err}", err.instance_path))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("document failed {} schema validation:\n{}", self.name, details);
        }
        Ok(())
    }

    /// Serialize `document` and validate the result.
    pub fn validate<T: Serialize>(&self, document: &T) -> Result<()> {
        let value = serde_json::to_value(document)
            .with_context(|| format!("serializing document for {} schema", self.name))?;
        self.validate_value(&value)
    }
}

/// Schemas for both published files.
pub struct SchemaSet {
    pub catalog: PublishedSchema,
    pub profile: PublishedSchema,
}

impl SchemaSet {
    /// Schemas bundled at compile time.
    pub fn bundled() -> Result<Self> {
        Ok(Self {
            catalog: PublishedSchema::from_str("catalog", CATALOG_SCHEMA)?,
            profile: PublishedSchema::from_str("profile", PROFILE_SCHEMA)?,
        })
    }

    /// Load `catalog.schema.json` and `profile.schema.json` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        Ok(Self {
            catalog: PublishedSchema::from_path(&dir.join(CATALOG_SCHEMA_FILE))?,
            profile: PublishedSchema::from_path(&dir.join(PROFILE_SCHEMA_FILE))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ProfileRecord, ProjectId, ProjectRecord};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn bundled_schemas_accept_published_documents() {
        let schemas = SchemaSet::bundled().expect("bundled schemas compile");
        let records = vec![
            ProjectRecord::placeholder(ProjectId("a".into())),
            ProjectRecord::placeholder(ProjectId("b".into())),
        ];
        let catalog = Catalog::build(records, None);
        schemas.catalog.validate(&catalog.publish()).unwrap();
        schemas.profile.validate(&ProfileRecord::default()).unwrap();
    }

    #[test]
    fn catalog_schema_reports_violations() {
        let schemas = SchemaSet::bundled().unwrap();
        let catalog = Catalog::build(
            vec![ProjectRecord::placeholder(ProjectId("a".into()))],
            None,
        );
        let mut value = serde_json::to_value(catalog.publish()).unwrap();
        value["schema_version"] = json!("other");
        value["projects"]["a"]["theme"] = json!("neon");
        let err = schemas.catalog.validate_value(&value).unwrap_err().to_string();
        assert!(err.contains("catalog schema"), "{err}");
        assert!(err.contains("/projects/a/theme"), "{err}");
        assert!(err.contains("/schema_version"), "{err}");
    }

    #[test]
    fn from_dir_loads_site_copies() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CATALOG_SCHEMA_FILE), CATALOG_SCHEMA).unwrap();
        std::fs::write(
            temp.path().join(PROFILE_SCHEMA_FILE),
            r#"{"type": "object", "required": ["nickname"]}"#,
        )
        .unwrap();
        let schemas = SchemaSet::from_dir(temp.path()).unwrap();
        assert!(schemas.profile.validate(&ProfileRecord::default()).is_err());

        let missing = TempDir::new().unwrap();
        assert!(SchemaSet::from_dir(missing.path()).is_err());
    }
}
