//! Terminal conversation view
//!
//! Terminal setup and teardown, the event channel, and the loop that ties
//! key presses and proxy replies to a [`DebateSession`].

pub mod handler;
pub mod ui;

use std::io::{self, Stderr};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{
        Event, EventStream, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::conversation::DebateReply;
use crate::session::{ClientError, DebateClient, DebateSession, Ticket};
use handler::Action;

pub type Tui = Terminal<CrosstermBackend<Stderr>>;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Reply {
        ticket: Ticket,
        outcome: Result<DebateReply, ClientError>,
    },
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let tx_events = tx.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            while let Some(evt) = reader.next().await {
                let app_event = match evt {
                    // Only key presses, not releases or repeats
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        Some(AppEvent::Key(key))
                    }
                    Ok(Event::Resize(w, h)) => Some(AppEvent::Resize(w, h)),
                    Ok(_) => None,
                    Err(e) => {
                        tracing::error!(error = %e, "terminal event stream failed");
                        break;
                    }
                };

                if let Some(event) = app_event {
                    if tx_events.send(event).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, tx }
    }

    /// For tasks that report back into the loop
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen)?;

    // Lets the terminal report Shift+Enter distinctly where it can
    if supports_keyboard_enhancement().unwrap_or(false) {
        execute!(
            io::stderr(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }

    let backend = CrosstermBackend::new(io::stderr());
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

pub fn restore() -> Result<()> {
    if supports_keyboard_enhancement().unwrap_or(false) {
        execute!(io::stderr(), PopKeyboardEnhancementFlags)?;
    }
    execute!(io::stderr(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Install panic hook to restore terminal on panic
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}

/// Drive the session until the user quits. Proxy calls run on their own
/// tasks so the view keeps redrawing while a reply is pending.
pub async fn run(
    terminal: &mut Tui,
    session: &mut DebateSession,
    client: Arc<dyn DebateClient>,
    endpoint: &str,
) -> Result<()> {
    let mut events = EventHandler::new();

    loop {
        terminal.draw(|frame| ui::draw(frame, session, endpoint))?;

        let Some(event) = events.next().await else {
            break;
        };

        match event {
            AppEvent::Key(key) => match handler::handle_key(session, key) {
                Action::Quit => break,
                Action::Submit(submission) => {
                    let client = Arc::clone(&client);
                    let tx = events.sender();
                    tokio::spawn(async move {
                        let outcome = client.send(&submission.request).await;
                        let _ = tx.send(AppEvent::Reply {
                            ticket: submission.ticket,
                            outcome,
                        });
                    });
                }
                Action::None => {}
            },
            AppEvent::Resize(_, _) => {}
            AppEvent::Reply { ticket, outcome } => {
                session.resolve(ticket, outcome);
            }
        }
    }

    Ok(())
}
