//! Renderers that derive displayed text from [`AppState`]
//!
//! Both renderers write into two designated elements and do nothing at all when
//! either of them is missing from the page.

use tracing::trace;

use crate::catalog::{wrap_index, PromptCatalog};
use crate::page::{
    Page, CAPTURE_PLACEHOLDER, CAPTURE_SUBTITLE, PROMPT_CATEGORY_LABEL, PROMPT_TEXT,
};
use crate::state::AppState;

/// Fill the capture placeholder body and subtitle for the selected format
pub fn render_capture_placeholder(state: &AppState, page: &mut Page) {
    let (Some(placeholder), Some(subtitle)) = (
        page.get_element_by_id(CAPTURE_PLACEHOLDER),
        page.get_element_by_id(CAPTURE_SUBTITLE),
    ) else {
        return;
    };

    let format = state.capture_format;
    page.set_text(placeholder, format.placeholder());
    page.set_text(subtitle, format.description());
    trace!(format = %format, "Rendered capture placeholder");
}

/// Show the current prompt and its category label
///
/// The stored index is wrapped into range and written back to `state`.
pub fn render_prompt_viewer(state: &mut AppState, catalog: &PromptCatalog, page: &mut Page) {
    let (Some(text), Some(label)) = (
        page.get_element_by_id(PROMPT_TEXT),
        page.get_element_by_id(PROMPT_CATEGORY_LABEL),
    ) else {
        return;
    };

    let prompts = catalog.prompts_or_fallback(&state.prompt_category);
    state.prompt_index = wrap_index(state.prompt_index, prompts.len());

    let prompt = usize::try_from(state.prompt_index)
        .ok()
        .and_then(|i| prompts.get(i))
        .map(String::as_str)
        .unwrap_or_default();
    page.set_text(text, prompt);
    page.set_text(
        label,
        &format!("Category: {}", catalog.label(&state.prompt_category)),
    );
    trace!(
        category = %state.prompt_category,
        index = state.prompt_index,
        "Rendered prompt viewer"
    );
}
