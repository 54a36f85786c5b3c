use crate::error::{ProgressError, Result};
use crate::project::Project;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Project name → project, iterated and persisted in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<(String, Project)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Project> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Project> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    /// Append a project. Returns `false` (and changes nothing) if the name is
    /// already taken.
    pub fn insert(&mut self, name: impl Into<String>, project: Project) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push((name, project));
        true
    }

    pub fn remove(&mut self, name: &str) -> Option<Project> {
        let pos = self.position(name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Project)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    // ---------------------------------------------------------------------------
    // Serialization
    // ---------------------------------------------------------------------------

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate persisted text. Any syntax error, schema mismatch,
    /// or invariant violation is reported as `MalformedPersistedState`.
    pub fn from_json(text: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(text)
            .map_err(|e| ProgressError::MalformedPersistedState(e.to_string()))?;
        for (name, project) in catalog.iter() {
            if name.is_empty() {
                return Err(ProgressError::MalformedPersistedState(
                    "empty project name".to_string(),
                ));
            }
            if let Some(problem) = project.check() {
                return Err(ProgressError::MalformedPersistedState(format!(
                    "project '{name}': {problem}"
                )));
            }
        }
        Ok(catalog)
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, project) in &self.entries {
            map.serialize_entry(name, project)?;
        }
        map.end()
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = Catalog;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping project names to projects")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Catalog, A::Error> {
        let mut catalog = Catalog::new();
        while let Some((name, project)) = access.next_entry::<String, Project>()? {
            if catalog.contains(&name) {
                return Err(de::Error::custom(format!("duplicate project '{name}'")));
            }
            catalog.entries.push((name, project));
        }
        Ok(catalog)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_survives_serialization() {
        let mut c = Catalog::new();
        for name in ["zeta", "alpha", "mid"] {
            assert!(c.insert(name, Project::new()));
        }
        let text = c.to_json().unwrap();
        let back = Catalog::from_json(&text).unwrap();
        assert_eq!(back.names().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(back, c);
    }

    #[test]
    fn insert_rejects_existing_name() {
        let mut c = Catalog::new();
        assert!(c.insert("a", Project::new()));
        assert!(!c.insert("a", Project::new()));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn reads_standard_schema() {
        let c = Catalog::from_json(
            r#"{ "Website": { "tasks": ["Build"], "completed": ["Design"] } }"#,
        )
        .unwrap();
        let p = c.get("Website").unwrap();
        assert_eq!(p.tasks, vec!["Build"]);
        assert_eq!(p.completed, vec!["Design"]);
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        for text in [
            "",
            "not json",
            "[]",
            r#"{"a": {"tasks": "oops"}}"#,
            r#"{"a": {}, "a": {}}"#,
            r#"{"a": {"tasks": ["x"], "completed": ["x"]}}"#,
            r#"{"": {}}"#,
            r#"{"a": {"tasks": [""]}}"#,
        ] {
            assert!(
                matches!(
                    Catalog::from_json(text),
                    Err(ProgressError::MalformedPersistedState(_))
                ),
                "expected malformed: {text:?}"
            );
        }
    }

    #[test]
    fn whitespace_names_on_disk_still_load() {
        let c = Catalog::from_json(r#"{" ": {"tasks": ["\t"], "completed": []}}"#).unwrap();
        assert_eq!(c.get(" ").unwrap().tasks, vec!["\t"]);
        assert_eq!(Catalog::from_json(&c.to_json().unwrap()).unwrap(), c);
    }

    #[test]
    fn remove_returns_project() {
        let mut c = Catalog::new();
        c.insert("a", Project::new());
        assert!(c.remove("a").is_some());
        assert!(c.remove("a").is_none());
        assert!(c.is_empty());
    }
}
