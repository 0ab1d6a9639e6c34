use serde::Serialize;
use std::io::Write;

use super::CommandHandler;
use crate::catalog::PromptCatalog;
use crate::cli::OutputFormat;
use crate::config::KinConfig;
use crate::{KinError, Result};

/// Handler for the `prompts` command
pub struct PromptsCommand {
    pub config: KinConfig,
    pub category: Option<String>,
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct CategoryListing<'a> {
    key: &'a str,
    label: &'a str,
    prompts: &'a [String],
}

impl CommandHandler for PromptsCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let catalog = match &self.config.catalog {
            Some(path) => PromptCatalog::load(path)?,
            None => PromptCatalog::builtin(),
        };

        let listings: Vec<CategoryListing> = catalog
            .categories()
            .iter()
            .filter(|c| self.category.as_deref().map_or(true, |key| c.key == key))
            .map(|c| CategoryListing {
                key: &c.key,
                label: catalog.label(&c.key),
                prompts: &c.prompts,
            })
            .collect();

        if let (Some(key), true) = (&self.category, listings.is_empty()) {
            return Err(KinError::Catalog(format!("Unknown category '{}'", key)));
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &listings)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                for (i, listing) in listings.iter().enumerate() {
                    if i > 0 {
                        writeln!(out)?;
                    }
                    writeln!(out, "{} ({})", listing.label, listing.key)?;
                    for (n, prompt) in listing.prompts.iter().enumerate() {
                        writeln!(out, "  {}. {}", n + 1, prompt)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "prompts"
    }
}

impl PromptsCommand {
    pub fn new(config: KinConfig, category: Option<String>, format: OutputFormat) -> Self {
        Self {
            config,
            category,
            format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(category: Option<&str>, format: OutputFormat) -> Result<String> {
        let command = PromptsCommand::new(
            KinConfig::default(),
            category.map(str::to_string),
            format,
        );
        let mut out = Vec::new();
        command.execute(&mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_lists_all_categories() {
        let text = run(None, OutputFormat::Text).unwrap();
        assert!(text.starts_with("Childhood (childhood)\n  1. What is one of your earliest"));
        assert!(text.contains("Random Fun (random)"));
        assert_eq!(text.lines().filter(|l| l.starts_with("  ")).count(), 30);
    }

    #[test]
    fn test_single_category_json() {
        let json = run(Some("lessons"), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["label"], "Life Lessons");
        assert_eq!(value[0]["prompts"][2], "What advice would you give your younger self?");
    }

    #[test]
    fn test_unknown_category() {
        assert!(matches!(
            run(Some("gardening"), OutputFormat::Text),
            Err(KinError::Catalog(_))
        ));
    }
}
