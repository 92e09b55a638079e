//! What the conversation view shows, independent of how it is drawn

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use super::DebateSession;
use crate::conversation::Message;

pub const PLACEHOLDER: &str = "Start a debate by typing your argument below!";
pub const THINKING: &str = "Thinking...";

#[derive(Debug, Clone, PartialEq)]
pub enum Entry<'a> {
    Message(&'a Message),
    /// Transient indicator after the last message while a reply is pending
    Thinking,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Placeholder,
    Transcript(Vec<Entry<'a>>),
}

pub fn view(session: &DebateSession) -> View<'_> {
    let transcript = session.transcript();

    if transcript.is_empty() && !session.is_pending() {
        return View::Placeholder;
    }

    let mut entries: Vec<Entry<'_>> = transcript.messages().iter().map(Entry::Message).collect();
    if session.is_pending() {
        entries.push(Entry::Thinking);
    }
    View::Transcript(entries)
}

/// Local wall-clock label, e.g. `3:04:05 PM`
pub fn time_label(timestamp: &DateTime<Utc>) -> String {
    format_time(&timestamp.with_timezone(&Local))
}

fn format_time<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    timestamp.format("%-I:%M:%S %p").to_string()
}
