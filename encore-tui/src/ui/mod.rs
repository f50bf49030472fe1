pub(crate) mod computing;
pub(crate) mod home;
pub(crate) mod layout;
pub(crate) mod logs;
pub(crate) mod members;
pub(crate) mod result;
pub(crate) mod settings;

use encore_core::{Step, StrategyKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};
use smol_str::ToSmolStr as _;

use crate::{app::App, keys};

pub const ACCENT: Color = Color::Magenta;
pub const TEXT: Color = Color::White;
pub const DIM: Color = Color::DarkGray;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    let main = layout::split_main(size);

    draw_header(frame, app, main.header);

    if app.show_logs {
        logs::draw(frame, &mut app.logs, main.content);
    } else {
        match app.session.step() {
            Step::Home => home::draw(frame, app.tick_count, main.content),
            Step::Members => {
                members::draw(frame, &app.members, &app.session.roster, main.content)
            }
            Step::Settings => settings::draw(frame, &app.settings, main.content),
            Step::Result => result::draw(
                frame,
                &app.logic.selection_state(),
                app.logic.strategy_kind(),
                app.tick_count,
                main.content,
            ),
        }
    }

    draw_help_bar(frame, app, main.help_bar);

    if app.quit_confirming {
        draw_quit_confirm(frame, size);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let steps = [Step::Home, Step::Members, Step::Settings, Step::Result];
    let current = app.session.step();

    let mut spans = vec![Span::styled(
        " encore ",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )];
    for (i, step) in steps.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" \u{203A} ", Style::default().fg(DIM)));
        }
        let style = if *step == current {
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DIM)
        };
        spans.push(Span::styled(step.as_str(), style));
    }
    let source = match app.logic.strategy_kind() {
        StrategyKind::Local => "local catalog".to_string(),
        StrategyKind::Remote => app.config.server.base_url.clone(),
    };
    spans.push(Span::styled(
        format!("  [{source}]"),
        Style::default().fg(DIM),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help_bar(frame: &mut Frame, app: &App, area: Rect) {
    let step = app.session.step();
    let help_actions: &[keys::Action] = if app.show_logs {
        keys::LOGS_HELP
    } else {
        match step {
            Step::Home => keys::HOME_HELP,
            Step::Members => keys::MEMBERS_HELP,
            Step::Settings => keys::SETTINGS_HELP,
            Step::Result => keys::RESULT_HELP,
        }
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for action in help_actions {
        if let Some((key, label)) = action.help_label(step) {
            spans.push(Span::styled(String::from(key), Style::default().fg(ACCENT)));
            spans.push(Span::styled(format!(":{label} "), Style::default().fg(DIM)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_quit_confirm(frame: &mut Frame, size: Rect) {
    let yes = keys::KEY_CONFIRM_YES.to_smolstr();
    let no = keys::KEY_CONFIRM_NO.to_smolstr();
    let prompt = format!("Quit? {yes}/{no}");
    // border (2) + padding (2)
    let popup_area = layout::centered(size, prompt.len() as u16 + 4, 3);

    frame.render_widget(Clear, popup_area);
    let popup = Paragraph::new(format!(" {prompt}"))
        .block(Block::bordered().style(Style::default().fg(TEXT)))
        .style(Style::default().fg(TEXT));
    frame.render_widget(popup, popup_area);
}
