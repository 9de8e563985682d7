//! Static local directory of doctors and hospitals.
//!
//! The built-in list ships with the binary; a YAML file with the same shape
//! can replace it (`CAREFIND_DIRECTORY_PATH`).

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const BUILTIN_DIRECTORY: &str = include_str!("../data/directory.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Doctor,
    Hospital,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Doctor => write!(f, "doctor"),
            ProviderKind::Hospital => write!(f, "hospital"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: ProviderKind,
    pub specialty: String,
    pub facility: String,
    pub contact: String,
    pub bio: String,
}

impl DirectoryEntry {
    /// Case-insensitive substring match against the searchable fields.
    /// `term` must already be lowercased.
    fn matches_term(&self, term: &str) -> bool {
        [&self.name, &self.specialty, &self.facility, &self.bio]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
    }
}

/// Kind filter plus free-text term. The default matches every entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderFilter {
    /// `None` means all kinds.
    pub kind: Option<ProviderKind>,
    pub term: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Directory {
    providers: Vec<DirectoryEntry>,
}

impl Directory {
    /// The directory compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the embedded YAML fails to parse or validate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml(BUILTIN_DIRECTORY)
    }

    /// Load and validate a directory from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::DirectoryFileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Load from `path` when given, otherwise fall back to the built-in list.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Directory::load`] or [`Directory::builtin`].
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Self::builtin(),
        }
    }

    fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let directory: Directory = serde_yaml::from_str(content)?;
        directory.validate()?;
        Ok(directory)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in &self.providers {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "provider name must be non-empty".to_string(),
                ));
            }
            if !seen.insert((entry.name.to_lowercase(), entry.kind)) {
                return Err(ConfigError::Validation(format!(
                    "duplicate {} entry: '{}'",
                    entry.kind, entry.name
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.providers
    }

    /// Entries matching both the kind filter and the search term, in
    /// directory order.
    #[must_use]
    pub fn filter(&self, filter: &ProviderFilter) -> Vec<&DirectoryEntry> {
        let term = filter.term.trim().to_lowercase();
        self.providers
            .iter()
            .filter(|e| filter.kind.is_none_or(|k| e.kind == k))
            .filter(|e| term.is_empty() || e.matches_term(&term))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[&DirectoryEntry]) -> Vec<String> {
        entries.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn builtin_directory_parses() {
        let dir = Directory::builtin().expect("builtin directory");
        assert_eq!(dir.entries().len(), 8);
        let doctors = dir.filter(&ProviderFilter {
            kind: Some(ProviderKind::Doctor),
            term: String::new(),
        });
        assert_eq!(doctors.len(), 5);
    }

    #[test]
    fn default_filter_returns_everything_in_order() {
        let dir = Directory::builtin().unwrap();
        let all = dir.filter(&ProviderFilter::default());
        assert_eq!(all.len(), dir.entries().len());
        assert_eq!(all[0].name, "Dr. Balamurali Srinivasan");
    }

    #[test]
    fn term_matches_specialty_case_insensitively() {
        let dir = Directory::builtin().unwrap();
        let hits = dir.filter(&ProviderFilter {
            kind: None,
            term: "NEUROLOGY".to_string(),
        });
        assert_eq!(names(&hits), vec!["Dr. Sanjiv Kumar Sharma"]);
    }

    #[test]
    fn term_matches_bio_and_facility() {
        let dir = Directory::builtin().unwrap();
        let hits = dir.filter(&ProviderFilter {
            kind: Some(ProviderKind::Hospital),
            term: "bariatu".to_string(),
        });
        assert_eq!(
            names(&hits),
            vec!["Rajendra Institute of Medical Sciences (RIMS)"]
        );

        let cardio = dir.filter(&ProviderFilter {
            kind: None,
            term: "cardiology".to_string(),
        });
        // Specialty on the doctor, bio on RIMS.
        assert_eq!(cardio.len(), 2);
    }

    #[test]
    fn kind_and_term_combine() {
        let dir = Directory::builtin().unwrap();
        let hits = dir.filter(&ProviderFilter {
            kind: Some(ProviderKind::Doctor),
            term: "paras".to_string(),
        });
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|e| e.kind == ProviderKind::Doctor));
    }

    #[test]
    fn no_match_is_empty() {
        let dir = Directory::builtin().unwrap();
        let hits = dir.filter(&ProviderFilter {
            kind: None,
            term: "veterinary".to_string(),
        });
        assert!(hits.is_empty());
    }

    #[test]
    fn duplicate_entries_are_rejected() {
        let yaml = r"
providers:
  - { name: A, kind: doctor, specialty: x, facility: y, contact: z, bio: b }
  - { name: a, kind: doctor, specialty: x, facility: y, contact: z, bio: b }
";
        let err = Directory::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn same_name_may_appear_once_per_kind() {
        let yaml = r"
providers:
  - { name: Paras, kind: doctor, specialty: x, facility: y, contact: z, bio: b }
  - { name: Paras, kind: hospital, specialty: x, facility: y, contact: z, bio: b }
";
        let dir = Directory::from_yaml(yaml).unwrap();
        assert_eq!(dir.entries().len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Directory::load(Path::new("/nonexistent/directory.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::DirectoryFileIo { .. }));
    }
}
