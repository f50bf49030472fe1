use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use encore_core::Step;
use smol_str::{SmolStr, ToSmolStr};

/// Centrally defined key actions for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Logs,
    Select,
    Back,
    Continue,
    NextField,
    PrevField,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    GotoTop,
    GotoBottom,
    Remove,
    ProposeAgain,
    StartOver,
    Char(char),
    DeleteChar,
}

// ── Key code constants ───────────────────────────────────────────

pub const KEY_QUIT: KeyCode = KeyCode::Char('q');
pub const KEY_LOGS: KeyCode = KeyCode::Char('L');
pub const KEY_SELECT: KeyCode = KeyCode::Enter;
pub const KEY_BACK: KeyCode = KeyCode::Esc;
pub const KEY_NEXT_FIELD: KeyCode = KeyCode::Tab;
pub const KEY_PREV_FIELD: KeyCode = KeyCode::BackTab;
pub const KEY_CONTINUE: char = 'n';
pub const KEY_REMOVE: KeyCode = KeyCode::Delete;
pub const KEY_REMOVE_ALT: KeyCode = KeyCode::Char('d');
pub const KEY_PROPOSE_AGAIN: KeyCode = KeyCode::Char('r');
pub const KEY_START_OVER: KeyCode = KeyCode::Char('h');
pub const KEY_UP: KeyCode = KeyCode::Up;
pub const KEY_DOWN: KeyCode = KeyCode::Down;
pub const KEY_LEFT: KeyCode = KeyCode::Left;
pub const KEY_RIGHT: KeyCode = KeyCode::Right;
pub const KEY_PAGE_UP: KeyCode = KeyCode::PageUp;
pub const KEY_PAGE_DOWN: KeyCode = KeyCode::PageDown;
pub const KEY_GOTO_TOP: KeyCode = KeyCode::Home;
pub const KEY_GOTO_BOTTOM: KeyCode = KeyCode::End;
pub const KEY_DELETE_CHAR: KeyCode = KeyCode::Backspace;
pub const KEY_CONFIRM_YES: KeyCode = KeyCode::Char('y');
pub const KEY_CONFIRM_NO: KeyCode = KeyCode::Char('n');

impl Action {
    /// Label shown in the help bar on `step`. Returns `None` for actions that
    /// shouldn't appear (text input, plain navigation, etc.).
    pub fn help_label(&self, step: Step) -> Option<(SmolStr, SmolStr)> {
        let (key, desc): (SmolStr, SmolStr) = match self {
            // `q` is text on the members screen, so Esc is the one that
            // always works there.
            Action::Quit if step == Step::Members => (key_label(KEY_BACK), "quit".into()),
            Action::Quit => (key_label(KEY_QUIT), "quit".into()),
            Action::Logs => (key_label(KEY_LOGS), "logs".into()),
            Action::Select => {
                let label = match step {
                    Step::Home => "start",
                    Step::Members => "add",
                    Step::Settings => "choose song",
                    Step::Result => return None,
                };
                (key_label(KEY_SELECT), label.into())
            }
            Action::Back => (key_label(KEY_BACK), "close".into()),
            Action::Continue => (format!("ctrl+{KEY_CONTINUE}").into(), "next".into()),
            Action::NextField => (key_label(KEY_NEXT_FIELD), "field".into()),
            Action::MoveLeft => ("\u{2190}/\u{2192}".into(), "change".into()),
            Action::Remove => (key_label(KEY_REMOVE_ALT), "remove".into()),
            Action::ProposeAgain => (key_label(KEY_PROPOSE_AGAIN), "propose again".into()),
            Action::StartOver => (key_label(KEY_START_OVER), "start over".into()),
            _ => return None,
        };
        Some((key, desc))
    }
}

/// How a key is written in the help bar. Letters keep their case, since
/// `L` and `l` are different keys.
fn key_label(key: KeyCode) -> SmolStr {
    match key {
        KeyCode::Char(c) => c.to_smolstr(),
        other => other.to_smolstr().to_lowercase().into(),
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Plain or shifted keys only. Ctrl and Alt chords never become text.
fn is_plain(key: &KeyEvent) -> bool {
    key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

/// Resolve a key event into an action on the home screen.
pub fn home_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_QUIT => Some(Action::Quit),
        KEY_LOGS => Some(Action::Logs),
        KEY_SELECT => Some(Action::Select),
        _ => None,
    }
}

/// Resolve a key event into an action on the members screen. While `typing`
/// into a text field every printable key is text, so the single-letter
/// shortcuts only apply when it isn't.
pub fn members_action(key: &KeyEvent, typing: bool) -> Option<Action> {
    if is_ctrl(key, KEY_CONTINUE) {
        return Some(Action::Continue);
    }
    match key.code {
        KEY_BACK => Some(Action::Quit),
        KEY_SELECT => Some(Action::Select),
        KEY_NEXT_FIELD => Some(Action::NextField),
        KEY_PREV_FIELD => Some(Action::PrevField),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        KEY_LEFT => Some(Action::MoveLeft),
        KEY_RIGHT => Some(Action::MoveRight),
        KEY_REMOVE => Some(Action::Remove),
        KEY_DELETE_CHAR => Some(Action::DeleteChar),
        KeyCode::Char(c) if typing && is_plain(key) => Some(Action::Char(c)),
        KeyCode::Char(_) if typing => None,
        KEY_QUIT => Some(Action::Quit),
        KEY_LOGS => Some(Action::Logs),
        KEY_REMOVE_ALT => Some(Action::Remove),
        _ => None,
    }
}

/// Resolve a key event into an action on the settings screen.
pub fn settings_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_QUIT => Some(Action::Quit),
        KEY_LOGS => Some(Action::Logs),
        KEY_SELECT => Some(Action::Select),
        KEY_UP | KEY_PREV_FIELD => Some(Action::MoveUp),
        KEY_DOWN | KEY_NEXT_FIELD => Some(Action::MoveDown),
        KEY_LEFT => Some(Action::MoveLeft),
        KEY_RIGHT => Some(Action::MoveRight),
        _ => None,
    }
}

/// Resolve a key event into an action on the result screen.
pub fn result_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_QUIT => Some(Action::Quit),
        KEY_LOGS => Some(Action::Logs),
        KEY_PROPOSE_AGAIN => Some(Action::ProposeAgain),
        KEY_START_OVER | KEY_BACK => Some(Action::StartOver),
        _ => None,
    }
}

/// Resolve a key event into an action in logs context.
pub fn logs_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_BACK | KEY_LOGS | KEY_QUIT => Some(Action::Back),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        KEY_PAGE_UP => Some(Action::PageUp),
        KEY_PAGE_DOWN => Some(Action::PageDown),
        KEY_GOTO_TOP => Some(Action::GotoTop),
        KEY_GOTO_BOTTOM => Some(Action::GotoBottom),
        _ => None,
    }
}

/// Resolve a key event into an action in quit-confirmation context.
/// `y` / Enter confirms; any other key cancels.
pub fn quit_confirm_action(key: &KeyEvent) -> Action {
    match key.code {
        KEY_CONFIRM_YES | KEY_SELECT => Action::Select,
        _ => Action::Back,
    }
}

pub const HOME_HELP: &[Action] = &[Action::Select, Action::Logs, Action::Quit];

pub const MEMBERS_HELP: &[Action] = &[
    Action::Select,
    Action::NextField,
    Action::MoveLeft,
    Action::Remove,
    Action::Continue,
    Action::Logs,
    Action::Quit,
];

pub const SETTINGS_HELP: &[Action] = &[
    Action::MoveLeft,
    Action::Select,
    Action::Logs,
    Action::Quit,
];

pub const RESULT_HELP: &[Action] = &[
    Action::ProposeAgain,
    Action::StartOver,
    Action::Logs,
    Action::Quit,
];

pub const LOGS_HELP: &[Action] = &[Action::Back];
