use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use portfolio_core::WidgetPhase;
use crate::app::App;
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub async fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
    }
    // Results land whenever they arrive, even while the panel is closed.
    app.collect_finished().await;
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any state
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('a') => {
                app.widget.toggle();
            }
            _ => {}
        }
        return;
    }
    // Alt chords are not text
    if key.modifiers.contains(KeyModifiers::ALT) {
        return;
    }

    match app.widget.phase() {
        WidgetPhase::Closed => handle_closed(app, key),
        WidgetPhase::Open => handle_open(app, key),
    }
}

fn handle_closed(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Enter | KeyCode::Char('a') => {
            app.widget.toggle();
        }
        _ => {}
    }
}

fn handle_open(app: &mut App, key: KeyEvent) {
    let mut draft = app.widget.state().draft_input.clone();
    let char_count = draft.chars().count();
    app.cursor = app.cursor.min(char_count);

    match key.code {
        KeyCode::Esc => {
            app.widget.toggle();
            return;
        }
        KeyCode::Enter => {
            app.submit();
            return;
        }
        KeyCode::Backspace => {
            if app.cursor > 0 {
                app.cursor -= 1;
                draft.remove(char_to_byte_index(&draft, app.cursor));
            }
        }
        KeyCode::Delete => {
            if app.cursor < char_count {
                draft.remove(char_to_byte_index(&draft, app.cursor));
            }
        }
        KeyCode::Left => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            app.cursor = (app.cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.cursor = 0;
        }
        KeyCode::End => {
            app.cursor = char_count;
        }
        KeyCode::Char(c) => {
            draft.insert(char_to_byte_index(&draft, app.cursor), c);
            app.cursor += 1;
        }
        _ => return,
    }

    app.widget.set_draft_input(draft);
}
