//! Expression catalog: name -> avatar model parameter id

use serde::{Deserialize, Serialize};

/// One catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpressionDef {
    /// Human-readable tag the backend sends (e.g. "吐舌")
    pub name: String,
    /// Opaque parameter id understood by the model (e.g. "key2")
    pub parameter_id: String,
}

/// Fixed, read-only mapping from expression tag to model parameter id.
///
/// Iteration order is stable (declaration order), which keeps the
/// zero-everything-then-set-one writes deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpressionCatalog {
    entries: Vec<ExpressionDef>,
}

impl ExpressionCatalog {
    pub fn new(entries: Vec<ExpressionDef>) -> Self {
        Self { entries }
    }

    /// Validate catalog shape: non-empty names/ids, no duplicates either way
    pub fn validate(&self) -> Result<(), String> {
        for entry in &self.entries {
            if entry.name.trim().is_empty() {
                return Err("Expression name cannot be empty".to_string());
            }
            if entry.parameter_id.trim().is_empty() {
                return Err(format!("Expression '{}' has an empty parameter id", entry.name));
            }
        }
        for (i, entry) in self.entries.iter().enumerate() {
            for other in &self.entries[i + 1..] {
                if entry.name == other.name {
                    return Err(format!("Duplicate expression name: {}", entry.name));
                }
                if entry.parameter_id == other.parameter_id {
                    return Err(format!("Duplicate parameter id: {}", entry.parameter_id));
                }
            }
        }
        Ok(())
    }

    /// Parameter id for a tag, if known
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.parameter_id.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpressionDef> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ExpressionCatalog {
    /// The PinkFox model's expression table
    fn default() -> Self {
        let entries = [
            ("吐舌", "key2"),
            ("黑脸", "key3"),
            ("眼泪", "key4"),
            ("脸红", "key5"),
            ("nn眼", "key6"),
            ("生气瘪嘴", "key7"),
            ("死鱼眼", "key8"),
            ("生气", "key9"),
            ("咪咪眼", "key10"),
            ("嘟嘴", "key11"),
            ("钱钱眼", "key12"),
            ("爱心", "key16"),
            ("泪眼", "key17"),
        ];
        Self {
            entries: entries
                .iter()
                .map(|(name, id)| ExpressionDef {
                    name: (*name).to_string(),
                    parameter_id: (*id).to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid() {
        let catalog = ExpressionCatalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(), 13);
    }

    #[test]
    fn lookup_known_and_unknown() {
        let catalog = ExpressionCatalog::default();
        assert_eq!(catalog.lookup("吐舌"), Some("key2"));
        assert_eq!(catalog.lookup("泪眼"), Some("key17"));
        assert_eq!(catalog.lookup("does-not-exist"), None);
    }

    #[test]
    fn duplicate_names_rejected() {
        let catalog = ExpressionCatalog::new(vec![
            ExpressionDef { name: "a".into(), parameter_id: "k1".into() },
            ExpressionDef { name: "a".into(), parameter_id: "k2".into() },
        ]);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn duplicate_parameter_ids_rejected() {
        let catalog = ExpressionCatalog::new(vec![
            ExpressionDef { name: "a".into(), parameter_id: "k1".into() },
            ExpressionDef { name: "b".into(), parameter_id: "k1".into() },
        ]);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn empty_fields_rejected() {
        let catalog = ExpressionCatalog::new(vec![ExpressionDef {
            name: " ".into(),
            parameter_id: "k1".into(),
        }]);
        assert!(catalog.validate().is_err());
    }
}
