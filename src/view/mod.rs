//! TUI rendering and terminal management (impure shell)

pub mod help;
pub mod render;
pub mod styles;

pub use help::{help_content, help_lines};
pub use render::{render_session, render_view};

use crate::config::keybindings::KeyBindings;
use crate::model::{AppError, KeyAction};
use crate::state::{prompt, AppState};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{debug, info};

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    poll_interval: Duration,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(app_state: AppState, poll_interval: Duration) -> Result<Self, AppError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self::with_terminal(
            terminal,
            app_state,
            KeyBindings::default(),
            poll_interval,
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Between key presses the loop wakes up
    /// every poll interval to let auto reload check the file.
    pub fn run(&mut self) -> Result<(), AppError> {
        info!(interval = ?self.poll_interval, "event loop started");
        self.draw()?;

        loop {
            if event::poll(self.poll_interval)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            break;
                        }
                        self.draw()?;
                    }
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height);
                        self.draw()?;
                    }
                    _ => {}
                }
            } else if self.app_state.poll() {
                self.draw()?;
            }
        }

        info!("event loop stopped");
        Ok(())
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Wraps an existing terminal. The session is sized to it.
    pub fn with_terminal(
        terminal: Terminal<B>,
        mut app_state: AppState,
        key_bindings: KeyBindings,
        poll_interval: Duration,
    ) -> Self {
        let (width, height) = match terminal.size() {
            Ok(size) => (size.width, size.height),
            Err(_) => (80, 24),
        };
        app_state.resize(usize::from(width), usize::from(height));
        Self {
            terminal,
            app_state,
            key_bindings,
            poll_interval,
        }
    }

    /// Session state.
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even with a prompt or help open
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.app_state.prompt().is_some() {
            self.handle_prompt_key(key);
            return false;
        }

        if self.app_state.is_help_shown() && matches!(key.code, KeyCode::Char('Q') | KeyCode::Esc)
        {
            return self.app_state.handle_action(KeyAction::Quit);
        }

        match self.key_bindings.get(key) {
            Some(action) => self.app_state.handle_action(action),
            None => {
                debug!(?key, "unbound key");
                false
            }
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => self.app_state.submit_prompt(),
            KeyCode::Esc => self.app_state.cancel_prompt(),
            KeyCode::Char('u') if control => self.app_state.edit_prompt(prompt::clear),
            KeyCode::Char(ch) if !control && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.app_state.edit_prompt(|p| prompt::insert_char(p, ch));
            }
            KeyCode::Backspace => self.app_state.edit_prompt(prompt::backspace),
            KeyCode::Delete => self.app_state.edit_prompt(prompt::delete),
            KeyCode::Left => self.app_state.edit_prompt(prompt::cursor_left),
            KeyCode::Right => self.app_state.edit_prompt(prompt::cursor_right),
            KeyCode::Home => self.app_state.edit_prompt(prompt::cursor_home),
            KeyCode::End => self.app_state.edit_prompt(prompt::cursor_end),
            _ => {}
        }
    }

    /// Lays every view out again for the new terminal size.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        self.app_state
            .resize(usize::from(width), usize::from(height));
        self.app_state
            .set_status(format!("Resized to {width}x{height}"));
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), AppError> {
        let state = &self.app_state;
        self.terminal.draw(|frame| render_session(frame, state))?;
        Ok(())
    }
}

/// Initialize and run the TUI over a prepared session
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_state(app_state: AppState, poll_interval: Duration) -> Result<(), AppError> {
    let mut app = match TuiApp::new(app_state, poll_interval) {
        Ok(app) => app,
        Err(e) => {
            let _ = restore_terminal();
            return Err(e);
        }
    };

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), AppError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
