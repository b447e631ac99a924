//! Keyboard input handling for the TUI.
//!
//! This module translates keyboard events into application state changes.
//! On the Register tab plain keys type into the form, so its commands use
//! Ctrl chords and Esc leaves the form.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use campreg_core::form::RenderMode;

use crate::app::{
    can_add_password_char, can_add_username_char, App, AppState, LoginFocus, Tab, PAGE_SCROLL_SIZE,
};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::LoggingIn => return handle_login_input(app, key),
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return Ok(false);
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return Ok(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::ConfirmingDelete => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
                _ => {}
            }
            return Ok(false);
        }
        AppState::Searching => return handle_search_input(app, key),
        AppState::Normal | AppState::Quitting => {}
    }

    if app.current_tab == Tab::Register {
        handle_register_input(app, key);
        return Ok(false);
    }

    // Detail popup swallows everything but close
    if app.detail.is_open() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.close_detail();
        }
        return Ok(false);
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('1') => app.current_tab = Tab::Members,
        KeyCode::Char('2') => app.current_tab = Tab::Register,
        KeyCode::Char('3') => app.current_tab = Tab::Dashboard,
        KeyCode::Left => app.current_tab = app.current_tab.prev(),
        KeyCode::Right => app.current_tab = app.current_tab.next(),
        KeyCode::Char('u') => app.refresh_members(),
        KeyCode::Char('L') => app.logout(),
        _ => {
            if app.current_tab == Tab::Members {
                handle_members_input(app, key);
            }
        }
    }

    Ok(false)
}

fn handle_search_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
            app.search_query.clear();
        }
        KeyCode::Enter => {
            // Keep search query active
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            app.clamp_selection();
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
            app.member_selection = 0;
        }
        _ => {}
    }
    Ok(false)
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Username,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Username => app.login_focus = LoginFocus::Password,
            LoginFocus::Password | LoginFocus::Button => app.attempt_login(),
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Username => {
                app.login_username.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Username => {
                if can_add_username_char(app.login_username.chars().count(), c) {
                    app.login_username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.chars().count(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

fn handle_members_input(app: &mut App, key: KeyEvent) {
    let max = app.filtered_members().len().saturating_sub(1);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.member_selection = (app.member_selection + 1).min(max);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.member_selection = app.member_selection.saturating_sub(1);
        }
        KeyCode::PageDown => {
            app.member_selection = (app.member_selection + PAGE_SCROLL_SIZE).min(max);
        }
        KeyCode::PageUp => {
            app.member_selection = app.member_selection.saturating_sub(PAGE_SCROLL_SIZE);
        }
        KeyCode::Home => app.member_selection = 0,
        KeyCode::End => app.member_selection = max,
        KeyCode::Enter => app.open_detail(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('/') => {
            app.state = AppState::Searching;
            app.search_query.clear();
            app.member_selection = 0;
        }
        KeyCode::Esc => {
            app.search_query.clear();
            app.clamp_selection();
        }
        _ => {}
    }
}

fn handle_register_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => app.submit_form(),
            KeyCode::Char('p') => app.print_form(RenderMode::Filled),
            KeyCode::Char('b') => app.print_form(RenderMode::Blank),
            KeyCode::Char('r') => app.reset_form(),
            KeyCode::Char('t') => app.form.toggle_render_mode(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.current_tab = Tab::Members,
        KeyCode::Down | KeyCode::Tab | KeyCode::Enter => app.form_focus = app.form_focus.next(),
        KeyCode::Up | KeyCode::BackTab => app.form_focus = app.form_focus.prev(),
        KeyCode::Left => app.form_cycle_choice(false),
        KeyCode::Right => app.form_cycle_choice(true),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_push_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campreg_core::config::Config;
    use campreg_core::form::Field;
    use campreg_core::models::{MemberId, MemberRecord};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn test_app(dir: &tempfile::TempDir) -> App {
        let config = Config {
            api_base_url: Some("http://127.0.0.1:9/api".to_string()),
            ..Default::default()
        };
        App::with_config(config, dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_register_tab_typing_and_navigation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.current_tab = Tab::Register;

        for c in "Ann".chars() {
            handle_input(&mut app, key(KeyCode::Char(c))).unwrap();
        }
        assert_eq!(app.form.value(Field::FullName), "Ann");

        // 'q' and digits type into the form instead of acting globally
        handle_input(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.form.value(Field::FullName), "Annq");

        handle_input(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.form_focus, Field::DateOfBirth);
        handle_input(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.form_focus, Field::FullName);

        handle_input(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.current_tab, Tab::Members);
    }

    #[test]
    fn test_register_ctrl_commands() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.current_tab = Tab::Register;

        handle_input(&mut app, ctrl('t')).unwrap();
        assert_eq!(app.form.render_mode(), RenderMode::Blank);

        handle_input(&mut app, key(KeyCode::Char('x'))).unwrap();
        handle_input(&mut app, ctrl('r')).unwrap();
        assert_eq!(app.form.value(Field::FullName), "");

        handle_input(&mut app, ctrl('s')).unwrap();
        assert!(!app.form_missing.is_empty());
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.members = vec![MemberRecord {
            id: Some(MemberId::new("1")),
            full_name: Some("Alice".into()),
            ..Default::default()
        }];

        handle_input(&mut app, key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.state, AppState::ConfirmingDelete);
        handle_input(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.members.len(), 1);
    }

    #[test]
    fn test_search_mode() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        handle_input(&mut app, key(KeyCode::Char('/'))).unwrap();
        assert_eq!(app.state, AppState::Searching);
        handle_input(&mut app, key(KeyCode::Char('a'))).unwrap();
        handle_input(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.search_query, "a");
    }

    #[test]
    fn test_quit_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        assert!(!handle_input(&mut app, key(KeyCode::Char('q'))).unwrap());
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(handle_input(&mut app, key(KeyCode::Char('y'))).unwrap());
        assert_eq!(app.state, AppState::Quitting);
    }
}
