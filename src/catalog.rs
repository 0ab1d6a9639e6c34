//! Prompt catalog: category keys mapped to ordered lists of writing prompts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::{KinError, Result};

/// Category used when the selected key is not in the catalog
pub const FALLBACK_CATEGORY: &str = "childhood";

/// Label shown for a category that has no entry in the name map
pub const FALLBACK_LABEL: &str = "Prompts";

const BUILTIN: &[(&str, &str, [&str; 5])] = &[
    (
        "childhood",
        "Childhood",
        [
            "What is one of your earliest happy memories?",
            "Who were the people you spent the most time with as a child?",
            "What did a perfect day look like when you were little?",
            "What was your favorite place to play?",
            "What is a childhood smell that you still remember?",
        ],
    ),
    (
        "traditions",
        "Traditions",
        [
            "What family tradition makes you feel most connected?",
            "Describe a holiday that felt especially meaningful.",
            "What weekly or daily rituals did your family have?",
            "What tradition would you like future generations to keep?",
            "Was there a tradition that changed over time?",
        ],
    ),
    (
        "funny",
        "Funny Stories",
        [
            "What is a time your family could not stop laughing?",
            "Tell the story of a harmless prank or mix\u{2011}up.",
            "What is the silliest thing you remember doing as a kid?",
            "Who in the family is most likely to make everyone laugh?",
            "Describe a photo that always makes you smile.",
        ],
    ),
    (
        "lessons",
        "Life Lessons",
        [
            "What is a lesson you learned the hard way?",
            "Who taught you something you still use every day?",
            "What advice would you give your younger self?",
            "What is a small habit that changed your life?",
            "What is a moment when you realized you had grown?",
        ],
    ),
    (
        "culture",
        "Culture",
        [
            "What meal feels like home to you?",
            "What songs or sounds remind you of your culture?",
            "How did your family talk about your heritage?",
            "What language or phrases feel special to you?",
            "What is a place that represents your culture?",
        ],
    ),
    (
        "random",
        "Random Fun",
        [
            "What is a small joy from this week?",
            "If you could replay one ordinary day, which would it be?",
            "What is an object in your home that holds a story?",
            "What is something you are grateful for right now?",
            "What tiny detail about today might you forget later?",
        ],
    ),
];

/// One named group of prompts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    /// Human-readable name; categories without one display [`FALLBACK_LABEL`]
    #[serde(default)]
    pub label: Option<String>,
    pub prompts: Vec<String>,
}

/// Immutable prompt catalog, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptCatalog {
    categories: Vec<Category>,
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PromptCatalog {
    /// The six categories shipped with the app
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(key, label, prompts)| Category {
                key: key.to_string(),
                label: Some(label.to_string()),
                prompts: prompts.iter().map(|p| p.to_string()).collect(),
            })
            .collect();
        Self { categories }
    }

    /// Build a catalog from explicit categories, validating it
    pub fn from_categories(categories: Vec<Category>) -> Result<Self> {
        let catalog = Self { categories };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a YAML file
    ///
    /// The file is a list of `{ key, label, prompts }` entries.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            KinError::Catalog(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        let categories: Vec<Category> = serde_yaml_ng::from_str(&contents)?;
        let catalog = Self::from_categories(categories)?;
        debug!(
            path = %path.display(),
            categories = catalog.categories.len(),
            "Loaded prompt catalog"
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.key.trim().is_empty() {
                return Err(KinError::Catalog("Category key must not be empty".into()));
            }
            if !seen.insert(category.key.as_str()) {
                return Err(KinError::Catalog(format!(
                    "Duplicate category '{}'",
                    category.key
                )));
            }
            if category.prompts.is_empty() {
                return Err(KinError::Catalog(format!(
                    "Category '{}' has no prompts",
                    category.key
                )));
            }
        }
        if !seen.contains(FALLBACK_CATEGORY) {
            return Err(KinError::Catalog(format!(
                "Catalog must contain the '{}' category",
                FALLBACK_CATEGORY
            )));
        }
        Ok(())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Prompts for `key`, falling back to the childhood list for unknown keys
    pub fn prompts_or_fallback(&self, key: &str) -> &[String] {
        self.get(key)
            .or_else(|| self.get(FALLBACK_CATEGORY))
            .map(|c| c.prompts.as_slice())
            .unwrap_or(&[])
    }

    /// Display name for `key`, or [`FALLBACK_LABEL`] when unmapped
    pub fn label(&self, key: &str) -> &str {
        self.get(key)
            .and_then(|c| c.label.as_deref())
            .unwrap_or(FALLBACK_LABEL)
    }
}

/// Wrap `index` into `0..len` with a modulo that is never negative.
///
/// Returns 0 for an empty list.
pub fn wrap_index(index: i64, len: usize) -> i64 {
    if len == 0 {
        return 0;
    }
    index.rem_euclid(len as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_has_six_categories_of_five() {
        let catalog = PromptCatalog::builtin();
        let keys: Vec<_> = catalog.categories().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["childhood", "traditions", "funny", "lessons", "culture", "random"]
        );
        assert!(catalog.categories().iter().all(|c| c.prompts.len() == 5));
    }

    #[test]
    fn test_labels() {
        let catalog = PromptCatalog::builtin();
        assert_eq!(catalog.label("funny"), "Funny Stories");
        assert_eq!(catalog.label("lessons"), "Life Lessons");
        assert_eq!(catalog.label("random"), "Random Fun");
        assert_eq!(catalog.label("gardening"), "Prompts");
    }

    #[test]
    fn test_unknown_category_falls_back_to_childhood() {
        let catalog = PromptCatalog::builtin();
        let prompts = catalog.prompts_or_fallback("gardening");
        assert_eq!(prompts[0], "What is one of your earliest happy memories?");
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(0, 5), 0);
        assert_eq!(wrap_index(5, 5), 0);
        assert_eq!(wrap_index(7, 5), 2);
        assert_eq!(wrap_index(-1, 5), 4);
        assert_eq!(wrap_index(-6, 5), 4);
        assert_eq!(wrap_index(i64::MIN, 5), i64::MIN.rem_euclid(5));
        assert_eq!(wrap_index(3, 0), 0);
    }

    #[test]
    fn test_load_custom_catalog() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
- key: childhood
  label: Growing Up
  prompts:
    - "Where did you live?"
- key: pets
  prompts:
    - "Name your first pet."
    - "What did it eat?"
"#
        )
        .unwrap();

        let catalog = PromptCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.label("childhood"), "Growing Up");
        assert_eq!(catalog.label("pets"), "Prompts");
        assert_eq!(catalog.prompts_or_fallback("pets").len(), 2);
    }

    #[test]
    fn test_catalog_requires_fallback_category() {
        let result = PromptCatalog::from_categories(vec![Category {
            key: "pets".into(),
            label: None,
            prompts: vec!["Name your first pet.".into()],
        }]);
        assert!(matches!(result, Err(KinError::Catalog(_))));
    }

    #[test]
    fn test_catalog_rejects_empty_and_duplicate_categories() {
        let empty = PromptCatalog::from_categories(vec![Category {
            key: "childhood".into(),
            label: None,
            prompts: vec![],
        }]);
        assert!(matches!(empty, Err(KinError::Catalog(_))));

        let entry = Category {
            key: "childhood".into(),
            label: None,
            prompts: vec!["a".into()],
        };
        let dup = PromptCatalog::from_categories(vec![entry.clone(), entry]);
        assert!(matches!(dup, Err(KinError::Catalog(_))));
    }
}
