pub mod click;
pub mod prompts;
pub mod screens;

use crate::Result;

/// Common trait for all non-interactive command handlers
pub trait CommandHandler {
    /// Execute the command, writing its report to `out`
    fn execute(&self, out: &mut dyn std::io::Write) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}
