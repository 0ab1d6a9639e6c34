use serde::Serialize;
use std::io::Write;

use super::CommandHandler;
use crate::cli::OutputFormat;
use crate::config::KinConfig;
use crate::controller::Controller;
use crate::page::{ACTIVE_CLASS, ATTR_SCREEN_TARGET};
use crate::Result;

/// Handler for the `screens` command
pub struct ScreensCommand {
    pub config: KinConfig,
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ScreenListing {
    id: String,
    active: bool,
    /// Labels of nav buttons pointing at this screen
    nav: Vec<String>,
}

impl CommandHandler for ScreensCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let mut controller = Controller::from_config(&self.config)?;
        controller.init()?;
        let page = controller.page();

        let listings: Vec<ScreenListing> = page
            .screens()
            .into_iter()
            .filter_map(|node| page.element(node))
            .map(|screen| {
                let id = screen.id.clone().unwrap_or_default();
                let nav = page
                    .nav_buttons()
                    .into_iter()
                    .filter_map(|n| page.element(n))
                    .filter(|b| b.data(ATTR_SCREEN_TARGET) == Some(id.as_str()))
                    .map(|b| b.text.clone())
                    .collect();
                ScreenListing {
                    active: screen.has_class(ACTIVE_CLASS),
                    id,
                    nav,
                }
            })
            .collect();

        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &listings)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                for listing in &listings {
                    let marker = if listing.active { "*" } else { " " };
                    if listing.nav.is_empty() {
                        writeln!(out, "{} {}", marker, listing.id)?;
                    } else {
                        writeln!(
                            out,
                            "{} {} [nav: {}]",
                            marker,
                            listing.id,
                            listing.nav.join(", ")
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "screens"
    }
}

impl ScreensCommand {
    pub fn new(config: KinConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_default_screens() {
        let command = ScreensCommand::new(KinConfig::default(), OutputFormat::Text);
        let mut out = Vec::new();
        command.execute(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "* home-screen [nav: Home]");
        assert!(lines.contains(&"  share-memory-capture"));
        assert!(lines.contains(&"  family [nav: Family]"));
    }

    #[test]
    fn test_configured_home_screen_is_active() {
        let config = KinConfig {
            home_screen: "prompts".into(),
            ..Default::default()
        };
        let command = ScreensCommand::new(config, OutputFormat::Json);
        let mut out = Vec::new();
        command.execute(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let active: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .filter(|s| s["active"] == true)
            .filter_map(|s| s["id"].as_str())
            .collect();
        assert_eq!(active, vec!["prompts"]);
    }
}
