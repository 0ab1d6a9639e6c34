use ratatui::{
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    DefaultTerminal, Frame,
};
use std::time::Duration;
use tokio::time;
use tracing::{debug, warn};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::events::AppEvent;
use super::theme::Theme;
use crate::controller::{ClickOutcome, Controller};
use crate::format::CaptureFormat;
use crate::page::{NodeId, CAPTURE_SCREEN, NEXT_PROMPT, PREV_PROMPT, PROMPT_VIEWER_SCREEN};
use crate::Result;

/// Main application struct
pub struct App {
    controller: Controller,
    /// Index into [`App::focusables`]
    focus: usize,
    /// Simulated writing area on the text capture screen. Never saved.
    draft: Input,
    /// Keys go to the draft instead of navigation
    editing: bool,
    /// Last click error, shown in the help bar until the next key
    status: Option<String>,
    should_quit: bool,
    theme: Theme,
}

impl App {
    /// Create a new app around an initialized controller
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            focus: 0,
            draft: Input::default(),
            editing: false,
            status: None,
            should_quit: false,
            theme: Theme::default(),
        }
    }

    /// Run the application
    pub async fn run(mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        terminal.clear()?;

        let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();

        // Blocking terminal reads stay off the render loop; the reader stops
        // once the receiver is dropped
        tokio::task::spawn_blocking(move || {
            while !event_tx.is_closed() {
                match event::poll(Duration::from_millis(100)) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(e) => {
                        warn!("Terminal input error: {}", e);
                        break;
                    }
                }
                let event = match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                    Ok(Event::Resize(width, height)) => AppEvent::Resize(width, height),
                    Ok(_) => continue,
                    Err(e) => {
                        warn!("Terminal input error: {}", e);
                        break;
                    }
                };
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });

        let result = self.main_loop(&mut terminal, &mut event_rx).await;
        drop(event_rx);

        ratatui::restore();
        result
    }

    async fn main_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        event_rx: &mut tokio::sync::mpsc::UnboundedReceiver<AppEvent>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;

            let event = match time::timeout(Duration::from_millis(250), event_rx.recv()).await {
                Ok(Some(event)) => event,
                Ok(None) => break,
                Err(_) => AppEvent::Tick,
            };
            self.handle_event(event)?;

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame) {
        super::screens::render(frame, self, &self.theme);
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
                Ok(())
            }
            AppEvent::Tick => Ok(()),
        }
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.status = None;

        if self.editing {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.editing = false,
                _ => {
                    self.draft.handle_event(&Event::Key(key));
                }
            }
            return Ok(());
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        let screen = self.controller.active_screen().map(str::to_string);
        let on_viewer = screen.as_deref() == Some(PROMPT_VIEWER_SCREEN);

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => self.move_focus(1),
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => self.move_focus(-1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(node) = self.focusables().get(self.focus).copied() {
                    self.click(node);
                }
            }
            KeyCode::Right | KeyCode::Char('n') if on_viewer => self.click_button(NEXT_PROMPT),
            KeyCode::Left | KeyCode::Char('p') if on_viewer => self.click_button(PREV_PROMPT),
            KeyCode::Char('i') if self.can_edit_draft() => self.editing = true,
            _ => {}
        }
        Ok(())
    }

    fn click_button(&mut self, id: &str) {
        if let Some(node) = self.controller.page().get_element_by_id(id) {
            self.click(node);
        }
    }

    fn click(&mut self, node: NodeId) {
        match self.controller.click(node) {
            Ok(ClickOutcome::Switched { screen }) => {
                debug!(screen = %screen, "Screen changed");
                self.focus = 0;
                self.editing = false;
            }
            Ok(_) => {}
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn move_focus(&mut self, delta: isize) {
        let count = self.focusables().len();
        if count == 0 {
            self.focus = 0;
            return;
        }
        self.focus = (self.focus as isize + delta).rem_euclid(count as isize) as usize;
    }

    fn can_edit_draft(&self) -> bool {
        self.controller.active_screen() == Some(CAPTURE_SCREEN)
            && self.controller.state().capture_format == CaptureFormat::Text
    }

    /// Clickable elements of the active screen followed by the nav bar
    pub fn focusables(&self) -> Vec<NodeId> {
        let page = self.controller.page();
        let active = self.controller.active_screen();
        let mut nodes = page
            .screens()
            .into_iter()
            .find(|&n| active.is_some() && page.element(n).and_then(|e| e.id.as_deref()) == active)
            .map(|screen| page.clickables_in(screen))
            .unwrap_or_default();
        nodes.extend(page.nav_buttons());
        nodes
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focusables().get(self.focus).copied()
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn draft(&self) -> &Input {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn show_draft(&self) -> bool {
        self.can_edit_draft()
    }
}
