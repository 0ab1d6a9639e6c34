//! Click handling and screen flow
//!
//! [`Controller`] owns the session: application state, prompt catalog and the
//! page it drives. Every user interaction is one synchronous call that runs to
//! completion before the next.

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::PromptCatalog;
use crate::config::KinConfig;
use crate::format::CaptureFormat;
use crate::page::{
    NodeId, Page, ATTR_CATEGORY, ATTR_FORMAT, ATTR_SCREEN_TARGET, CAPTURE_PLACEHOLDER,
    CAPTURE_SCREEN, CAPTURE_SUBTITLE, HOME_SCREEN, NEXT_PROMPT, PREV_PROMPT,
    PROMPT_CATEGORY_LABEL, PROMPT_TEXT, PROMPT_VIEWER_SCREEN,
};
use crate::render::{render_capture_placeholder, render_prompt_viewer};
use crate::state::AppState;
use crate::switcher::{ScreenSwitcher, UnknownScreen};
use crate::{KinError, Result};

/// What a click ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing under the click reacts to it
    Ignored,
    /// A screen-target element was hit
    Switched { screen: String },
    /// The next/previous prompt button was hit
    Stepped { index: i64 },
}

/// Read-only view of the session, for printing and assertions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub active_screen: Option<String>,
    pub state: AppState,
    pub capture_placeholder: Option<String>,
    pub capture_subtitle: Option<String>,
    pub prompt_text: Option<String>,
    pub prompt_category_label: Option<String>,
}

/// Where a delegated click leads and what it selects on the way
struct Navigation {
    screen: String,
    format: Option<CaptureFormat>,
    category: Option<String>,
}

pub struct Controller {
    state: AppState,
    catalog: PromptCatalog,
    page: Page,
    switcher: ScreenSwitcher,
    home_screen: String,
    prompt_controls_wired: bool,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(
            PromptCatalog::builtin(),
            Page::kin_default(),
            ScreenSwitcher::default(),
        )
    }
}

impl Controller {
    pub fn new(catalog: PromptCatalog, page: Page, switcher: ScreenSwitcher) -> Self {
        Self {
            state: AppState::default(),
            catalog,
            page,
            switcher,
            home_screen: HOME_SCREEN.to_string(),
            prompt_controls_wired: false,
        }
    }

    /// Build a controller from configuration, loading custom catalog and layout files
    pub fn from_config(config: &KinConfig) -> Result<Self> {
        let catalog = match &config.catalog {
            Some(path) => PromptCatalog::load(path)?,
            None => PromptCatalog::builtin(),
        };
        let page = match &config.layout {
            Some(path) => Page::load(path)?,
            None => Page::kin_default(),
        };
        let switcher = ScreenSwitcher::new(if config.strict_screens {
            UnknownScreen::Reject
        } else {
            UnknownScreen::Blank
        });

        let mut controller = Self::new(catalog, page, switcher);
        controller.home_screen = config.home_screen.clone();
        Ok(controller)
    }

    /// Show the home screen, wire the prompt buttons and pre-render both views
    pub fn init(&mut self) -> Result<()> {
        self.switcher.show(&mut self.page, &self.home_screen)?;

        self.prompt_controls_wired = self.page.get_element_by_id(NEXT_PROMPT).is_some()
            && self.page.get_element_by_id(PREV_PROMPT).is_some();
        if !self.prompt_controls_wired {
            debug!("Prompt buttons missing from page, next/previous disabled");
        }

        render_prompt_viewer(&mut self.state, &self.catalog, &mut self.page);
        render_capture_placeholder(&self.state, &mut self.page);
        info!(home = %self.home_screen, "Session started");
        Ok(())
    }

    /// Dispatch a click on `node`
    ///
    /// The dedicated prompt buttons react first, then the delegated handler looks
    /// for the nearest screen-target element. A target the switcher refuses fails
    /// the whole click before anything changes.
    pub fn click(&mut self, node: NodeId) -> Result<ClickOutcome> {
        let navigation = self.navigation_for(node);
        if let Some(nav) = &navigation {
            self.switcher.check(&self.page, &nav.screen)?;
        }

        let mut outcome = ClickOutcome::Ignored;
        if let Some(delta) = self.prompt_button_delta(node) {
            outcome = self.step_prompt(delta);
        }

        if let Some(nav) = navigation {
            outcome = self.navigate(nav)?;
        }
        Ok(outcome)
    }

    /// Click the element with `id`
    pub fn click_id(&mut self, id: &str) -> Result<ClickOutcome> {
        let node = self
            .page
            .get_element_by_id(id)
            .ok_or_else(|| KinError::UnknownElement(id.to_string()))?;
        self.click(node)
    }

    /// Advance to the next prompt
    pub fn next_prompt(&mut self) -> ClickOutcome {
        self.step_prompt(1)
    }

    /// Go back to the previous prompt
    pub fn prev_prompt(&mut self) -> ClickOutcome {
        self.step_prompt(-1)
    }

    /// No-op unless both prompt buttons were present at [`init`](Self::init)
    fn step_prompt(&mut self, delta: i64) -> ClickOutcome {
        if !self.prompt_controls_wired {
            return ClickOutcome::Ignored;
        }
        self.state.step_prompt(delta);
        render_prompt_viewer(&mut self.state, &self.catalog, &mut self.page);
        debug!(
            category = %self.state.prompt_category,
            index = self.state.prompt_index,
            "Stepped prompt"
        );
        ClickOutcome::Stepped {
            index: self.state.prompt_index,
        }
    }

    fn prompt_button_delta(&self, node: NodeId) -> Option<i64> {
        let mut current = Some(node);
        while let Some(id) = current {
            let element = self.page.element(id)?;
            match element.id.as_deref() {
                Some(NEXT_PROMPT) => return Some(1),
                Some(PREV_PROMPT) => return Some(-1),
                _ => {}
            }
            current = element.parent();
        }
        None
    }

    /// Resolve the nearest screen-target element above `node`
    fn navigation_for(&self, node: NodeId) -> Option<Navigation> {
        let button = self.page.closest_with_data(node, ATTR_SCREEN_TARGET)?;
        let element = self.page.element(button)?;
        let screen = element
            .data(ATTR_SCREEN_TARGET)
            .filter(|t| !t.is_empty())?
            .to_string();
        let format = element
            .data(ATTR_FORMAT)
            .filter(|f| !f.is_empty())
            .map(CaptureFormat::from_attr);
        let category = element
            .data(ATTR_CATEGORY)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Some(Navigation {
            screen,
            format,
            category,
        })
    }

    fn navigate(&mut self, nav: Navigation) -> Result<ClickOutcome> {
        self.switcher.show(&mut self.page, &nav.screen)?;

        if let Some(format) = nav.format {
            self.state.capture_format = format;
        }
        if let Some(category) = &nav.category {
            self.state.select_category(category);
        }

        if nav.screen == CAPTURE_SCREEN {
            render_capture_placeholder(&self.state, &mut self.page);
        } else if nav.screen == PROMPT_VIEWER_SCREEN {
            render_prompt_viewer(&mut self.state, &self.catalog, &mut self.page);
        }

        debug!(
            screen = %nav.screen,
            format = %self.state.capture_format,
            category = %self.state.prompt_category,
            "Navigated"
        );
        Ok(ClickOutcome::Switched { screen: nav.screen })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn catalog(&self) -> &PromptCatalog {
        &self.catalog
    }

    pub fn active_screen(&self) -> Option<&str> {
        self.page.active_screen()
    }

    pub fn snapshot(&self) -> Snapshot {
        let text = |id: &str| self.page.text_of(id).map(str::to_string);
        Snapshot {
            active_screen: self.active_screen().map(str::to_string),
            state: self.state.clone(),
            capture_placeholder: text(CAPTURE_PLACEHOLDER),
            capture_subtitle: text(CAPTURE_SUBTITLE),
            prompt_text: text(PROMPT_TEXT),
            prompt_category_label: text(PROMPT_CATEGORY_LABEL),
        }
    }
}
