use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};
use portfolio_core::{Sender, WidgetPhase};
use crate::app::App;

const PANEL_WIDTH: u16 = 48;
const PANEL_HEIGHT: u16 = 26;

/// Wrap text to fit within a given width, returning multiple lines
/// Uses word boundaries for wrapping (doesn't break mid-word)
fn wrap_text_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len == 0 {
            current_line = word.to_string();
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current_line.push(' ');
            current_line.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
            current_len = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    render_page(frame, area);

    match app.widget.phase() {
        WidgetPhase::Closed => render_launcher(app, frame, area),
        WidgetPhase::Open => render_panel(app, frame, area),
    }
}

fn render_page(frame: &mut Frame, area: Rect) {
    let text = Text::from(vec![
        Line::from(Span::styled(
            "Meu Portfólio",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Ctrl+A abre o assistente · q sai",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    let page = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(page, area);
}

/// Anchor a box of the given size to the bottom-right corner of `area`.
fn bottom_right(area: Rect, width: u16, height: u16) -> Rect {
    let [_, column] = Layout::horizontal([Constraint::Min(0), Constraint::Length(width)])
        .areas(area);
    let [_, corner] = Layout::vertical([Constraint::Min(0), Constraint::Length(height)])
        .areas(column);
    corner
}

fn render_launcher(app: &App, frame: &mut Frame, area: Rect) {
    let badge_area = bottom_right(area, 18, 3);

    let mut spans = vec![Span::raw(" Assistente ")];
    if app.widget.state().has_unread_notification {
        spans.push(Span::styled("●", Style::default().fg(Color::Red)));
    }

    let badge = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(Clear, badge_area);
    frame.render_widget(badge, badge_area);
}

fn render_panel(app: &App, frame: &mut Frame, area: Rect) {
    let panel_area = bottom_right(area, PANEL_WIDTH.min(area.width), PANEL_HEIGHT.min(area.height));
    frame.render_widget(Clear, panel_area);

    let [chat_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(panel_area);

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" AI Assistant · {} ", app.model))
        .title_bottom(" Esc / Ctrl+A fecha ");

    let inner_width = chat_area.width.saturating_sub(2) as usize;
    let inner_height = chat_area.height.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for msg in app.widget.conversation().all() {
        let (label, color) = match msg.sender() {
            Sender::User => ("Você:", Color::Cyan),
            Sender::Assistant => ("AI:", Color::Yellow),
        };
        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        for paragraph in msg.text().lines() {
            for wrapped in wrap_text_to_width(paragraph, inner_width) {
                lines.push(Line::from(wrapped));
            }
        }
        lines.push(Line::default());
    }

    if app.is_thinking() {
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Pensando{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    // Keep the newest messages in view
    let scroll = lines.len().saturating_sub(inner_height) as u16;
    let chat = Paragraph::new(Text::from(lines))
        .block(chat_block)
        .scroll((scroll, 0));
    frame.render_widget(chat, chat_area);

    let draft = &app.widget.state().draft_input;
    let input_width = input_area.width.saturating_sub(2) as usize;
    let cursor = app.cursor.min(draft.chars().count());
    let scroll_offset = cursor.saturating_sub(input_width.saturating_sub(1));
    let visible: String = draft.chars().skip(scroll_offset).take(input_width).collect();

    let input_text = if draft.is_empty() {
        Span::styled("Digite uma mensagem...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(visible)
    };

    let input = Paragraph::new(Line::from(input_text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Enter envia "),
        );
    frame.render_widget(input, input_area);

    frame.set_cursor_position((
        input_area.x + (cursor - scroll_offset) as u16 + 1,
        input_area.y + 1,
    ));
}
