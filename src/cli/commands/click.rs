use std::io::Write;
use std::str::FromStr;
use tracing::info;

use super::CommandHandler;
use crate::cli::OutputFormat;
use crate::config::KinConfig;
use crate::controller::{Controller, Snapshot};
use crate::{KinError, Result};

/// One scripted interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Press the next-prompt button
    Next,
    /// Press the previous-prompt button
    Prev,
    /// Click the element with this id
    Element(String),
    /// Click the first element whose data attributes match all pairs
    Data(Vec<(String, String)>),
}

impl FromStr for Step {
    type Err = KinError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s {
            "" => Err(KinError::Config("Empty click step".into())),
            "@next" => Ok(Step::Next),
            "@prev" => Ok(Step::Prev),
            _ if s.starts_with('@') => Err(KinError::Config(format!(
                "Unknown step '{}', expected @next or @prev",
                s
            ))),
            _ if s.contains('=') => {
                let pairs = s
                    .split(',')
                    .map(|pair| match pair.split_once('=') {
                        Some((k, v)) if !k.trim().is_empty() => {
                            Ok((k.trim().to_string(), v.trim().to_string()))
                        }
                        _ => Err(KinError::Config(format!("Invalid selector '{}'", pair))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Step::Data(pairs))
            }
            _ => Ok(Step::Element(s.to_string())),
        }
    }
}

/// Handler for the `click` command
pub struct ClickCommand {
    pub config: KinConfig,
    pub steps: Vec<String>,
    pub format: OutputFormat,
}

impl CommandHandler for ClickCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let steps = self
            .steps
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<Step>>>()?;

        let snapshot = Self::replay(&self.config, &steps)?;

        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &snapshot)?;
                writeln!(out)?;
            }
            OutputFormat::Text => write_text(out, &snapshot)?,
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "click"
    }
}

impl ClickCommand {
    pub fn new(config: KinConfig, steps: Vec<String>, format: OutputFormat) -> Self {
        Self {
            config,
            steps,
            format,
        }
    }

    /// Start a session and apply `steps` in order
    pub fn replay(config: &KinConfig, steps: &[Step]) -> Result<Snapshot> {
        let mut controller = Controller::from_config(config)?;
        controller.init()?;

        for step in steps {
            let outcome = match step {
                Step::Next => controller.next_prompt(),
                Step::Prev => controller.prev_prompt(),
                Step::Element(id) => controller.click_id(id)?,
                Step::Data(pairs) => {
                    let borrowed: Vec<(&str, &str)> = pairs
                        .iter()
                        .map(|(k, v)| (k.as_str(), v.as_str()))
                        .collect();
                    let node = controller.page().find_by_data(&borrowed).ok_or_else(|| {
                        KinError::UnknownElement(
                            pairs
                                .iter()
                                .map(|(k, v)| format!("{}={}", k, v))
                                .collect::<Vec<_>>()
                                .join(","),
                        )
                    })?;
                    controller.click(node)?
                }
            };
            info!(step = ?step, outcome = ?outcome, "Applied click step");
        }

        Ok(controller.snapshot())
    }
}

fn write_text(out: &mut dyn Write, snapshot: &Snapshot) -> Result<()> {
    writeln!(
        out,
        "screen:   {}",
        snapshot.active_screen.as_deref().unwrap_or("(none)")
    )?;
    writeln!(out, "format:   {}", snapshot.state.capture_format)?;
    writeln!(
        out,
        "category: {} (index {})",
        snapshot.state.prompt_category, snapshot.state.prompt_index
    )?;
    if let Some(label) = &snapshot.prompt_category_label {
        writeln!(out, "label:    {}", label)?;
    }
    if let Some(prompt) = &snapshot.prompt_text {
        writeln!(out, "prompt:   {}", prompt)?;
    }
    if let Some(subtitle) = &snapshot.capture_subtitle {
        writeln!(out, "capture:  {}", subtitle)?;
    }
    Ok(())
}
