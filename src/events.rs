use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // Manual refresh of the control table
        KeyCode::Char('r') => app.refresh_controls(),

        KeyCode::Char('t') => app.toggle_epoch_style(),

        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::data::EpochStyle;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let (mut app, _rx) = test_app();
            handle_key_event(&mut app, key);
            assert!(!app.running);
        }
    }

    #[test]
    fn test_any_key_closes_help() {
        let (mut app, _rx) = test_app();

        handle_key_event(&mut app, press(KeyCode::Char('?')));
        assert!(app.show_help);

        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_refresh_key_requests_control_poll() {
        let (mut app, mut rx) = test_app();

        handle_key_event(&mut app, press(KeyCode::Char('r')));
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_toggle_timestamp_key() {
        let (mut app, _rx) = test_app();

        handle_key_event(&mut app, press(KeyCode::Char('t')));
        assert_eq!(app.controls.formatter().style, EpochStyle::Time);
    }

    #[test]
    fn test_unbound_key_ignored() {
        let (mut app, mut rx) = test_app();

        handle_key_event(&mut app, press(KeyCode::Char('x')));
        assert!(app.running);
        assert!(rx.try_recv().is_err());
    }
}
