use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::{DebateSession, Submission};

/// What the event loop must do after a key press
#[derive(Debug)]
pub enum Action {
    None,
    Submit(Submission),
    Quit,
}

pub fn handle_key(session: &mut DebateSession, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if ctrl => Action::Quit,

        KeyCode::Char('n') if ctrl => {
            session.new_debate();
            Action::None
        }

        // Newline affordance. Plain terminals rarely report Shift on Enter,
        // so Alt+Enter and Ctrl+J do the same.
        KeyCode::Enter if key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            session.insert_newline();
            Action::None
        }
        KeyCode::Char('j') if ctrl => {
            session.insert_newline();
            Action::None
        }

        KeyCode::Enter => match session.submit() {
            Some(submission) => Action::Submit(submission),
            None => Action::None,
        },

        KeyCode::Backspace => {
            session.backspace();
            Action::None
        }

        KeyCode::Char(c) if !ctrl => {
            session.push_char(c);
            Action::None
        }

        _ => Action::None,
    }
}
