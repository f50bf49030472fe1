use encore_core::encore_state::Preferences;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{ACCENT, DIM, TEXT, layout};
use crate::keys::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Row {
    #[default]
    Mood,
    Situation,
    MicCount,
}
impl Row {
    const ALL: [Row; 3] = [Row::Mood, Row::Situation, Row::MicCount];

    fn label(self) -> &'static str {
        match self {
            Row::Mood => "Mood",
            Row::Situation => "Situation",
            Row::MicCount => "Mics",
        }
    }
}

pub enum SettingsAction {
    Submit(Preferences),
    Quit,
    ToggleLogs,
}

/// The settings screen: one row per preference, each cycled in place.
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub row: Row,
    pub preferences: Preferences,
}
impl SettingsForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, action: Action) -> Option<SettingsAction> {
        match action {
            Action::MoveUp => self.row = step_row(self.row, false),
            Action::MoveDown => self.row = step_row(self.row, true),
            Action::MoveLeft => self.cycle(false),
            Action::MoveRight => self.cycle(true),
            Action::Select => return Some(SettingsAction::Submit(self.preferences)),
            Action::Quit => return Some(SettingsAction::Quit),
            Action::Logs => return Some(SettingsAction::ToggleLogs),
            _ => {}
        }
        None
    }

    fn cycle(&mut self, forward: bool) {
        let p = &mut self.preferences;
        match (self.row, forward) {
            (Row::Mood, true) => p.mood = p.mood.next(),
            (Row::Mood, false) => p.mood = p.mood.prev(),
            (Row::Situation, true) => p.situation = p.situation.next(),
            (Row::Situation, false) => p.situation = p.situation.prev(),
            (Row::MicCount, true) => p.mic_count = p.mic_count.next(),
            (Row::MicCount, false) => p.mic_count = p.mic_count.prev(),
        }
    }

    fn value(&self, row: Row) -> String {
        match row {
            Row::Mood => self.preferences.mood.as_str().to_string(),
            Row::Situation => self.preferences.situation.as_str().to_string(),
            Row::MicCount => {
                let count = self.preferences.mic_count;
                format!("{count} {}", if count.get() == 1 { "singer" } else { "singers" })
            }
        }
    }
}

fn step_row(row: Row, forward: bool) -> Row {
    let i = Row::ALL.iter().position(|r| *r == row).unwrap_or(0);
    if forward {
        Row::ALL[(i + 1).min(Row::ALL.len() - 1)]
    } else {
        Row::ALL[i.saturating_sub(1)]
    }
}

pub fn draw(frame: &mut Frame, form: &SettingsForm, area: Rect) {
    let area = layout::centered(area, layout::SETTINGS_WIDTH, layout::SETTINGS_HEIGHT);
    let block = Block::default()
        .title(" What kind of night is it? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Row::ALL
        .iter()
        .map(|&row| {
            let focused = row == form.row;
            let (left, right) = if focused {
                ("\u{25C2} ", " \u{25B8}")
            } else {
                ("  ", "  ")
            };
            let value_style = if focused {
                Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT)
            };
            Line::from(vec![
                Span::styled(
                    format!(" {:width$}", row.label(), width = layout::FORM_LABEL_WIDTH),
                    Style::default().fg(if focused { ACCENT } else { DIM }),
                ),
                Span::styled(left, Style::default().fg(ACCENT)),
                Span::styled(form.value(row), value_style),
                Span::styled(right, Style::default().fg(ACCENT)),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        " Enter to pick the first song",
        Style::default().fg(DIM),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
