use encore_core::encore_state::{Gender, MemberDraft, MemberId, Roster};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::{ACCENT, DIM, TEXT, layout};
use crate::keys::Action;

/// Which part of the members screen has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Nickname,
    Gender,
    Age,
    List,
}
impl Field {
    const ALL: [Field; 4] = [Field::Nickname, Field::Gender, Field::Age, Field::List];

    fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether printable keys go into this field as text.
    pub fn is_text(self) -> bool {
        matches!(self, Field::Nickname | Field::Age)
    }
}

/// What the members screen asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembersAction {
    Add,
    Remove(MemberId),
    Continue,
    Quit,
    ToggleLogs,
}

/// The add-member form and the cursor in the member list.
#[derive(Debug, Clone, Default)]
pub struct MembersForm {
    pub field: Field,
    pub draft: MemberDraft,
    pub selected: usize,
}
impl MembersForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what was typed, ready for the next member.
    pub fn clear_inputs(&mut self) {
        self.draft = MemberDraft::default();
        self.field = Field::Nickname;
    }

    /// Keep the list cursor on a member after the roster shrinks.
    pub fn clamp_selection(&mut self, roster_len: usize) {
        self.selected = self.selected.min(roster_len.saturating_sub(1));
    }

    pub fn handle_key(&mut self, roster: &Roster, action: Action) -> Option<MembersAction> {
        match action {
            Action::NextField => self.field = self.field.next(),
            Action::PrevField => self.field = self.field.prev(),
            Action::MoveUp if self.field == Field::List => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::MoveDown if self.field == Field::List => {
                self.selected = (self.selected + 1).min(roster.len().saturating_sub(1));
            }
            Action::MoveUp => self.field = self.field.prev(),
            Action::MoveDown => self.field = self.field.next(),
            Action::MoveLeft if self.field == Field::Gender => {
                self.draft.gender = self.draft.gender.prev();
            }
            Action::MoveRight if self.field == Field::Gender => {
                self.draft.gender = self.draft.gender.next();
            }
            Action::Char(c) => match self.field {
                Field::Nickname
                    if self.draft.nickname.chars().count() < layout::NICKNAME_MAX_CHARS =>
                {
                    self.draft.nickname.push(c);
                }
                Field::Age
                    if c.is_ascii_digit() && self.draft.age.len() < layout::AGE_MAX_DIGITS =>
                {
                    self.draft.age.push(c);
                }
                _ => {}
            },
            Action::DeleteChar => match self.field {
                Field::Nickname => {
                    self.draft.nickname.pop();
                }
                Field::Age => {
                    self.draft.age.pop();
                }
                _ => {}
            },
            Action::Select if self.field == Field::List => return Some(MembersAction::Continue),
            Action::Select => return Some(MembersAction::Add),
            Action::Remove if self.field == Field::List => {
                return roster
                    .members()
                    .get(self.selected)
                    .map(|member| MembersAction::Remove(member.id.clone()));
            }
            Action::Continue => return Some(MembersAction::Continue),
            Action::Quit => return Some(MembersAction::Quit),
            Action::Logs => return Some(MembersAction::ToggleLogs),
            _ => {}
        }
        None
    }
}

pub fn draw(frame: &mut Frame, form: &MembersForm, roster: &Roster, area: Rect) {
    let members = layout::split_members(area);

    draw_form(frame, form, members.form);
    draw_list(frame, form, roster, members.list);

    let hint = if roster.is_empty() {
        Span::styled(
            " Add at least one member to continue.",
            Style::default().fg(DIM),
        )
    } else {
        Span::styled(
            format!(" {} member(s). Ctrl+N when everyone is in.", roster.len()),
            Style::default().fg(DIM),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(hint)), members.hint);
}

fn draw_form(frame: &mut Frame, form: &MembersForm, area: Rect) {
    let block = Block::default()
        .title(" Who's singing? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let gender = Gender::ALL
        .iter()
        .map(|g| {
            if *g == form.draft.gender {
                Span::styled(
                    format!("[{g}] "),
                    Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!(" {g}  "), Style::default().fg(DIM))
            }
        })
        .collect::<Vec<_>>();

    let nickname = text_value(form, Field::Nickname, &form.draft.nickname);
    let age = text_value(form, Field::Age, &form.draft.age);
    let lines = vec![
        input_line(form, Field::Nickname, "Nickname", vec![nickname]),
        input_line(form, Field::Gender, "Gender", gender),
        input_line(form, Field::Age, "Age", vec![age]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn input_line<'a>(
    form: &MembersForm,
    field: Field,
    label: &str,
    value: Vec<Span<'a>>,
) -> Line<'a> {
    let focused = form.field == field;
    let marker = if focused { "\u{25B8} " } else { "  " };
    let label_style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM)
    };

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(ACCENT)),
        Span::styled(
            format!("{label:width$}", width = layout::FORM_LABEL_WIDTH),
            label_style,
        ),
    ];
    spans.extend(value);
    Line::from(spans)
}

fn text_value<'a>(form: &MembersForm, field: Field, value: &str) -> Span<'a> {
    if form.field == field {
        Span::styled(format!("{value}\u{2588}"), Style::default().fg(TEXT))
    } else {
        Span::styled(value.to_string(), Style::default().fg(TEXT))
    }
}

fn draw_list(frame: &mut Frame, form: &MembersForm, roster: &Roster, area: Rect) {
    let focused = form.field == Field::List;
    let block = Block::default()
        .title(format!(" Members ({}) ", roster.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { ACCENT } else { DIM }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if roster.is_empty() {
        let empty = Paragraph::new("Nobody yet").style(Style::default().fg(DIM));
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = roster
        .members()
        .iter()
        .enumerate()
        .map(|(i, member)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(DIM)),
                Span::styled(
                    layout::fit_to_width(&member.nickname, layout::NICKNAME_COLUMN_WIDTH),
                    Style::default().fg(TEXT),
                ),
                Span::styled(
                    format!(" {:>3}  {}", member.age, member.gender),
                    Style::default().fg(DIM),
                ),
            ]))
        })
        .collect();

    let list =
        List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if focused {
        state.select(Some(form.selected.min(roster.len() - 1)));
    }
    frame.render_stateful_widget(list, inner, &mut state);
}
