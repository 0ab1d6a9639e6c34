use serde::Serialize;

use crate::catalog::FALLBACK_CATEGORY;
use crate::format::CaptureFormat;

/// Mutable session state shared by the click handlers and renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppState {
    pub capture_format: CaptureFormat,
    /// Category key as set by the last category control; may be unknown to the catalog
    pub prompt_category: String,
    /// Position in the category's prompt list. Normalized by the prompt viewer renderer.
    pub prompt_index: i64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            capture_format: CaptureFormat::Photo,
            prompt_category: FALLBACK_CATEGORY.to_string(),
            prompt_index: 0,
        }
    }
}

impl AppState {
    /// Select a category; switching always restarts at the first prompt
    pub fn select_category(&mut self, category: &str) {
        self.prompt_category = category.to_string();
        self.prompt_index = 0;
    }

    pub fn step_prompt(&mut self, delta: i64) {
        self.prompt_index = self.prompt_index.wrapping_add(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = AppState::default();
        assert_eq!(state.capture_format, CaptureFormat::Photo);
        assert_eq!(state.prompt_category, "childhood");
        assert_eq!(state.prompt_index, 0);
    }

    #[test]
    fn test_select_category_resets_index() {
        let mut state = AppState {
            prompt_category: "funny".into(),
            prompt_index: 3,
            ..Default::default()
        };
        state.select_category("culture");
        assert_eq!(state.prompt_category, "culture");
        assert_eq!(state.prompt_index, 0);
    }
}
