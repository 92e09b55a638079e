use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::conversation::{Message, Role};
use crate::session::{time_label, view, DebateSession, Entry, View, PLACEHOLDER, THINKING};

const INPUT_PLACEHOLDER: &str = "Enter your argument...";

/// Margin on the side opposite each speaker, so turns read as two columns
const MARGIN: usize = 6;

pub fn draw(frame: &mut Frame, session: &DebateSession, endpoint: &str) {
    let [header_area, chat_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header_area, endpoint);
    render_chat(frame, chat_area, session);
    render_input(frame, input_area, session);
    render_footer(frame, footer_area);
}

fn render_header(frame: &mut Frame, area: Rect, endpoint: &str) {
    let title = Line::from(vec![
        Span::styled(" Debate ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!(" {} ", endpoint), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_chat(frame: &mut Frame, area: Rect, session: &DebateSession) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);

    let text = match view(session) {
        View::Placeholder => Text::from(
            Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))
                .alignment(Alignment::Center),
        ),
        View::Transcript(entries) => {
            let mut lines: Vec<Line> = Vec::new();
            for entry in entries {
                match entry {
                    Entry::Message(message) => push_message(&mut lines, message),
                    Entry::Thinking => lines.push(
                        Line::from(Span::styled(
                            THINKING,
                            Style::default()
                                .fg(Color::DarkGray)
                                .add_modifier(Modifier::ITALIC),
                        ))
                        .alignment(Alignment::Center),
                    ),
                }
            }
            Text::from(lines)
        }
    };

    let chat = Paragraph::new(text).wrap(Wrap { trim: false });

    // Keep the newest turn in view. Counted before the block is attached so
    // the borders are not included.
    let rows = chat.line_count(inner_width).min(u16::MAX as usize) as u16;
    let scroll = rows.saturating_sub(inner_height);

    frame.render_widget(chat.block(block).scroll((scroll, 0)), area);
}

fn push_message(lines: &mut Vec<Line<'_>>, message: &Message) {
    let (label, color, alignment) = match message.role {
        Role::User => ("You", Color::Blue, Alignment::Right),
        Role::Bot => ("Debater", Color::Gray, Alignment::Left),
    };
    let margin = " ".repeat(MARGIN);

    let mut header = vec![Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if let Some(timestamp) = &message.timestamp {
        header.push(Span::styled(
            format!("  {}", time_label(timestamp)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(header).alignment(alignment));

    for line in message.content.lines() {
        let padded = match message.role {
            Role::User => format!("{}{}", margin, line),
            Role::Bot => format!("{}{}", line, margin),
        };
        lines.push(
            Line::from(Span::styled(padded, Style::default().fg(Color::White)))
                .alignment(alignment),
        );
    }
    lines.push(Line::default());
}

fn render_input(frame: &mut Frame, area: Rect, session: &DebateSession) {
    let pending = session.is_pending();
    let border_color = if pending { Color::DarkGray } else { Color::Yellow };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(if pending { " Waiting for reply " } else { " Argument " });

    let input = session.input();
    let paragraph = if input.is_empty() {
        Paragraph::new(Span::styled(
            INPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let style = if pending {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        Paragraph::new(Text::styled(input.to_string(), style))
    };

    // The cursor sits at the end of the last line; scroll down to that line
    // and sideways far enough to keep it visible
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    let line_count = input.split('\n').count() as u16;
    let scroll_y = line_count.saturating_sub(inner_height);

    let last_line = input.rsplit('\n').next().unwrap_or_default();
    let cursor_col = Line::from(last_line).width().min(u16::MAX as usize) as u16;
    let scroll_x = if cursor_col >= inner_width {
        cursor_col - inner_width + 1
    } else {
        0
    };

    frame.render_widget(paragraph.block(block).scroll((scroll_y, scroll_x)), area);

    if !pending && inner_width > 0 {
        let row = line_count.saturating_sub(1).saturating_sub(scroll_y);
        let col = cursor_col - scroll_x;
        frame.set_cursor_position(Position::new(area.x + 1 + col, area.y + 1 + row));
    }
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(Color::Black).bg(Color::Cyan);
    let label_style = Style::default().fg(Color::DarkGray);

    let help = Line::from(vec![
        Span::styled(" Enter ", key_style),
        Span::styled(" send ", label_style),
        Span::styled(" Shift+Enter ", key_style),
        Span::styled(" newline ", label_style),
        Span::styled(" Ctrl+N ", key_style),
        Span::styled(" new debate ", label_style),
        Span::styled(" Esc ", key_style),
        Span::styled(" quit ", label_style),
    ]);
    frame.render_widget(Paragraph::new(help), area);
}
