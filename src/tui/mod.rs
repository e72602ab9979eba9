//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! One thread owns `App`. Key events become actions and go through
//! `update()`. A submitted message spawns exactly one tokio task that calls
//! the transport and sends back exactly one action over an mpsc channel,
//! which the loop drains between frames.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the thinking bubble pulses.
//! - **Idle**: sleeps up to 500ms, only redraws on events, on a revision
//!   change of the conversation, or on terminal resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::agent::{ChatTransport, HttpTransport};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub pulse_value: f32,
    /// Last `App::revision` the view reacted to
    seen_revision: u64,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            pulse_value: 0.0,
            seen_revision: 0,
        }
    }

    /// Observe the conversation revision. On change, re-pin the transcript
    /// to the newest content and report that a redraw is due.
    pub fn observe(&mut self, app: &App) -> bool {
        if app.revision() == self.seen_revision {
            return false;
        }
        self.seen_revision = app.revision();
        self.message_list.follow_latest();
        true
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let transport: Arc<dyn ChatTransport> = Arc::new(HttpTransport::new(&config.base_url));
    let mut app = App::new(transport, &config.greeting);
    let mut tui = TuiState::new();
    info!(
        "Session {} talking to {}{}",
        app.session_id,
        config.base_url,
        crate::agent::CHAT_PATH
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        if tui.observe(&app) || app.is_loading() {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 5.0).sin() * 0.5 + 0.5;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.is_loading() {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::Quit | TuiEvent::ForceQuit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.message_list.handle_event(&event);
                }
                _ => {
                    // Keep the send gate current for Enter pressed before the next frame
                    tui.input_box.can_send = app.can_send(&tui.input_box.buffer);
                    if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event)
                        && let Effect::SpawnRequest(message) = update(&mut app, Action::Submit(text))
                    {
                        spawn_request(&app, message, tx.clone());
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Completed exchanges from background tasks
        while let Ok(action) = rx.try_recv() {
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Run one exchange in the background. The task reports back exactly one
/// action, success or failure, so the loading flag is always released.
fn spawn_request(app: &App, message: String, tx: mpsc::Sender<Action>) {
    info!("Spawning chat request");

    let transport = app.transport.clone();
    let session_id = app.session_id.as_str().to_string();

    tokio::spawn(async move {
        let started = Instant::now();
        let outcome = transport.send(&session_id, &message).await;
        debug!(
            "Chat request finished in {}ms (ok={})",
            started.elapsed().as_millis(),
            outcome.is_ok()
        );
        if tx.send(Action::from_outcome(outcome)).is_err() {
            warn!("Failed to deliver chat result: receiver dropped");
        }
    });
}
