use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Stable identifier for a project: the stem of its source document.
///
/// Doubles as the catalog key and the URL slug (`/project-<id>.html`), so it
/// is never rewritten after being derived from the file name.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// Derive an id from a source document path (`projects/enemy-ai.txt` → `enemy-ai`).
    pub fn from_source_path(path: &Path) -> Option<Self> {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .map(|stem| ProjectId(stem.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Site-relative page path for the project entry point.
    pub fn page_path(&self) -> String {
        format!("/project-{}.html", self.0)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Versioned key stamped on published catalog documents.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Category an asset file falls into, decided by its extension.
///
/// Known variants drive which list a file lands in; `Other` keeps the
/// lowercased extension so ignored files can be reported.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AssetKind {
    Image,
    Video,
    Document,
    Other(String),
}

impl AssetKind {
    /// Classify a file name by its extension, case-insensitively.
    pub fn from_file_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "webp" | "gif" | "svg" => AssetKind::Image,
            "mp4" | "webm" | "mov" => AssetKind::Video,
            "csv" => AssetKind::Document,
            _ => AssetKind::Other(ext),
        }
    }
}

/// Colour theme assigned to a project by its catalog position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Palette {
    pub theme: &'static str,
    pub accent: &'static str,
    pub secondary: &'static str,
}

pub const PALETTES: [Palette; 4] = [
    Palette {
        theme: "ledger",
        accent: "#c9a24b",
        secondary: "#35463f",
    },
    Palette {
        theme: "forge",
        accent: "#8f6a33",
        secondary: "#35463f",
    },
    Palette {
        theme: "signal",
        accent: "#c9a24b",
        secondary: "#8f6a33",
    },
    Palette {
        theme: "citadel",
        accent: "#8f6a33",
        secondary: "#35463f",
    },
];

impl Palette {
    /// Palette for the project at `position` in display order; cycles.
    pub fn for_position(position: usize) -> Palette {
        PALETTES[position % PALETTES.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn asset_kind_classifies_extensions_case_insensitively() {
        assert_eq!(AssetKind::from_file_name("hero.PNG"), AssetKind::Image);
        assert_eq!(AssetKind::from_file_name("diagram.svg"), AssetKind::Image);
        assert_eq!(AssetKind::from_file_name("demo.MoV"), AssetKind::Video);
        assert_eq!(AssetKind::from_file_name("scores.csv"), AssetKind::Document);
        assert_eq!(
            AssetKind::from_file_name("notes.md"),
            AssetKind::Other("md".to_string())
        );
        assert_eq!(
            AssetKind::from_file_name("README"),
            AssetKind::Other(String::new())
        );
    }

    #[test]
    fn project_id_derives_from_file_stem() {
        let id = ProjectId::from_source_path(&PathBuf::from("projects/enemy-ai.txt")).unwrap();
        assert_eq!(id.as_str(), "enemy-ai");
        assert_eq!(id.page_path(), "/project-enemy-ai.html");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"enemy-ai\"");
        assert!(ProjectId::from_source_path(&PathBuf::from("/")).is_none());
        assert_eq!(ProjectId::default().as_str(), "");
    }

    #[test]
    fn palettes_cycle_by_position() {
        assert_eq!(Palette::for_position(0).theme, "ledger");
        assert_eq!(Palette::for_position(3).theme, "citadel");
        assert_eq!(Palette::for_position(4), Palette::for_position(0));
        assert_eq!(Palette::for_position(6).accent, "#c9a24b");
    }
}
