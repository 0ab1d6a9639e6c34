//! Exclusive screen activation

use tracing::{trace, warn};

use crate::page::{Page, ACTIVE_CLASS, ATTR_SCREEN_TARGET};
use crate::{KinError, Result};

/// What to do when asked to show a screen id that is not in the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownScreen {
    /// Deactivate every screen and carry on
    #[default]
    Blank,
    /// Refuse the switch and leave the page untouched
    Reject,
}

/// Marks exactly one screen and its nav button active
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenSwitcher {
    pub on_unknown: UnknownScreen,
}

impl ScreenSwitcher {
    pub fn new(on_unknown: UnknownScreen) -> Self {
        Self { on_unknown }
    }

    /// Fail with [`KinError::ScreenNotFound`] if [`show`](Self::show) would refuse `id`
    pub fn check(&self, page: &Page, id: &str) -> Result<()> {
        if self.on_unknown == UnknownScreen::Reject && !Self::is_known(page, id) {
            return Err(KinError::ScreenNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Show screen `id`, hiding every other screen and syncing the nav bar
    pub fn show(&self, page: &mut Page, id: &str) -> Result<()> {
        self.check(page, id)?;
        if !Self::is_known(page, id) {
            warn!(screen = id, "No such screen, all screens hidden");
        }

        for node in page.screens() {
            let is_target = page.element(node).and_then(|e| e.id.as_deref()) == Some(id);
            page.set_class(node, ACTIVE_CLASS, is_target);
        }

        for node in page.nav_buttons() {
            let is_target =
                page.element(node).and_then(|e| e.data(ATTR_SCREEN_TARGET)) == Some(id);
            page.set_class(node, ACTIVE_CLASS, is_target);
        }

        trace!(screen = id, "Switched screen");
        Ok(())
    }

    fn is_known(page: &Page, id: &str) -> bool {
        page.screens()
            .into_iter()
            .any(|n| page.element(n).and_then(|e| e.id.as_deref()) == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{HOME_SCREEN, PROMPT_VIEWER_SCREEN};

    fn active_screens(page: &Page) -> Vec<String> {
        page.screens()
            .into_iter()
            .filter_map(|n| page.element(n))
            .filter(|e| e.has_class(ACTIVE_CLASS))
            .filter_map(|e| e.id.clone())
            .collect()
    }

    fn active_nav_targets(page: &Page) -> Vec<String> {
        page.nav_buttons()
            .into_iter()
            .filter_map(|n| page.element(n))
            .filter(|e| e.has_class(ACTIVE_CLASS))
            .filter_map(|e| e.data(ATTR_SCREEN_TARGET).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_every_screen_can_be_shown_exclusively() {
        let mut page = Page::kin_default();
        let switcher = ScreenSwitcher::default();
        let ids: Vec<String> = page
            .screens()
            .into_iter()
            .filter_map(|n| page.element(n).and_then(|e| e.id.clone()))
            .collect();
        assert_eq!(ids.len(), 6);

        for id in ids {
            switcher.show(&mut page, &id).unwrap();
            assert_eq!(active_screens(&page), vec![id.clone()]);

            let has_button = page.nav_buttons().into_iter().any(|n| {
                page.element(n).and_then(|e| e.data(ATTR_SCREEN_TARGET)) == Some(id.as_str())
            });
            if has_button {
                assert_eq!(active_nav_targets(&page), vec![id.clone()]);
            } else {
                assert!(active_nav_targets(&page).is_empty());
            }
        }
    }

    #[test]
    fn test_unknown_screen_blanks_page() {
        let mut page = Page::kin_default();
        let switcher = ScreenSwitcher::default();
        switcher.show(&mut page, HOME_SCREEN).unwrap();
        switcher.show(&mut page, "nowhere").unwrap();
        assert!(active_screens(&page).is_empty());
        assert!(active_nav_targets(&page).is_empty());
    }

    #[test]
    fn test_unknown_screen_rejected_when_strict() {
        let mut page = Page::kin_default();
        let switcher = ScreenSwitcher::new(UnknownScreen::Reject);
        switcher.show(&mut page, PROMPT_VIEWER_SCREEN).unwrap();
        let err = switcher.show(&mut page, "nowhere").unwrap_err();
        assert!(matches!(err, KinError::ScreenNotFound(id) if id == "nowhere"));
        assert_eq!(page.active_screen(), Some(PROMPT_VIEWER_SCREEN));
    }

    #[test]
    fn test_check_only_refuses_when_strict() {
        let page = Page::kin_default();
        let strict = ScreenSwitcher::new(UnknownScreen::Reject);
        assert!(strict.check(&page, HOME_SCREEN).is_ok());
        assert!(matches!(
            strict.check(&page, "nowhere"),
            Err(KinError::ScreenNotFound(_))
        ));
        assert!(ScreenSwitcher::default().check(&page, "nowhere").is_ok());
    }
}
