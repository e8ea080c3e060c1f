//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//! The intention is to swap this out for a different adapter (web, etc.)
//! in the future if needed.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (an operation in flight): draws every ~80ms so the
//!   spinner stays smooth.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous
//! redraws.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{BackendError, DocQaBackend, HttpBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{AnswerViewState, FilePickerState, InputBox, InputEvent, PickerEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_box: InputBox,
    pub answer_view: AnswerViewState,
    /// Upload overlay (None = hidden)
    pub file_picker: Option<FilePickerState>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            input_box: InputBox::new(),
            answer_view: AnswerViewState::new(),
            file_picker: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the backend client from the resolved config.
pub fn build_backend(config: &ResolvedConfig) -> Arc<dyn DocQaBackend> {
    let timeout = config.request_timeout_secs.map(Duration::from_secs);
    Arc::new(
        HttpBackend::new(config.base_url.clone(), timeout)
            .expect("backend client construction failed"),
    )
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend = build_backend(&config);
    let mut app = App::from_config(backend, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Populate the document panel before the first keystroke
    spawn_list_documents(app.backend.clone(), tx.clone());

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // Sync InputBox props with App state
        tui.input_box.disabled = app.query.is_loading();

        // Spinner animation runs while any operation is in flight
        let animating = app.is_busy();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // ForceQuit (Ctrl+C) always quits regardless of mode
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // When the file picker is open, route all events to it
            if let Some(ref mut picker) = tui.file_picker {
                if let Some(picker_event) = picker.handle_event(&event) {
                    match picker_event {
                        PickerEvent::Upload(path) => {
                            tui.file_picker = None;
                            let effect = update(&mut app, Action::StartUpload(path));
                            handle_effect(effect, &app, &tx, &mut should_quit);
                        }
                        PickerEvent::Dismiss => {
                            tui.file_picker = None;
                        }
                    }
                }
                continue;
            }

            // Ctrl+U opens the upload picker
            if matches!(event, TuiEvent::OpenFilePicker) {
                tui.file_picker = Some(FilePickerState::scan(
                    &config.docs_dir,
                    &config.extensions,
                ));
                continue;
            }

            // Ctrl+R refreshes the document panel
            if matches!(event, TuiEvent::RefreshDocuments) {
                let effect = update(&mut app, Action::RefreshDocuments);
                handle_effect(effect, &app, &tx, &mut should_quit);
                continue;
            }

            // Scrolling always goes to the answer viewer
            if matches!(
                event,
                TuiEvent::MouseScrollUp
                    | TuiEvent::MouseScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
                    | TuiEvent::CursorUp
                    | TuiEvent::CursorDown
            ) {
                let scroll = match event {
                    TuiEvent::CursorUp => TuiEvent::MouseScrollUp,
                    TuiEvent::CursorDown => TuiEvent::MouseScrollDown,
                    other => other,
                };
                tui.answer_view.handle_event(&scroll);
                continue;
            }

            // Everything else belongs to the query form
            if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event) {
                let effect = update(&mut app, Action::SubmitQuery(text));
                handle_effect(effect, &app, &tx, &mut should_quit);
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (settled backend calls)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let fresh_answer =
                matches!(&action, Action::QueryFinished(Ok(outcome)) if outcome.success);
            let effect = update(&mut app, action);
            if fresh_answer {
                tui.answer_view.reset();
            }
            handle_effect(effect, &app, &tx, &mut should_quit);
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Carries out an effect returned by `update()`. I/O lives here, not in core.
fn handle_effect(effect: Effect, app: &App, tx: &mpsc::Sender<Action>, should_quit: &mut bool) {
    match effect {
        Effect::None => {}
        Effect::Quit => *should_quit = true,
        Effect::SpawnQuery(question) => spawn_query(app.backend.clone(), question, tx.clone()),
        Effect::SpawnUpload(path) => spawn_upload(app.backend.clone(), path, tx.clone()),
        Effect::SpawnListDocuments => spawn_list_documents(app.backend.clone(), tx.clone()),
    }
}

fn spawn_query(backend: Arc<dyn DocQaBackend>, question: String, tx: mpsc::Sender<Action>) {
    info!("Spawning query request ({} chars)", question.len());
    tokio::spawn(async move {
        let result = backend.submit_query(&question).await;
        if tx.send(Action::QueryFinished(result)).is_err() {
            warn!("Failed to send query result: receiver dropped");
        }
    });
}

fn spawn_upload(backend: Arc<dyn DocQaBackend>, path: PathBuf, tx: mpsc::Sender<Action>) {
    info!("Spawning upload of {}", path.display());
    tokio::spawn(async move {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let result = match tokio::fs::read(&path).await {
            Ok(bytes) => backend.upload_document(&file_name, bytes).await,
            Err(e) => Err(BackendError::Config(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        };

        if tx.send(Action::UploadFinished(result)).is_err() {
            warn!("Failed to send upload result: receiver dropped");
        }
    });
}

fn spawn_list_documents(backend: Arc<dyn DocQaBackend>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let result = backend.list_documents().await;
        if tx.send(Action::DocumentsLoaded(result)).is_err() {
            warn!("Failed to send document listing: receiver dropped");
        }
    });
}
