use encore_core::{Selection, SelectionState, StrategyKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{ACCENT, DIM, TEXT, computing, layout};

pub fn draw(
    frame: &mut Frame,
    state: &SelectionState,
    strategy: StrategyKind,
    tick_count: u64,
    area: Rect,
) {
    match state {
        SelectionState::Idle => {
            let idle = Paragraph::new("Nothing proposed yet.")
                .style(Style::default().fg(DIM))
                .centered();
            frame.render_widget(idle, layout::centered(area, area.width, 1));
        }
        SelectionState::Computing { .. } => {
            computing::draw(frame, tick_count, strategy.as_str(), area);
        }
        SelectionState::Ready { selection, .. } => draw_selection(frame, selection, area),
        SelectionState::Failed { error, .. } => draw_failure(frame, error, area),
    }
}

fn draw_selection(frame: &mut Frame, selection: &Selection, area: Rect) {
    let song = &selection.song;

    let mut lines = vec![
        Line::from(Span::styled(
            "Let's kick things off with this one!",
            Style::default().fg(DIM),
        )),
        Line::default(),
        Line::from(Span::styled(
            song.title.as_str(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(song.artist.as_str(), Style::default().fg(TEXT))),
        Line::from(Span::styled(
            format!("{} \u{00B7} {}", song.year, song.genre),
            Style::default().fg(DIM),
        )),
        Line::default(),
        Line::from(Span::styled(
            "\u{1F3A4} Singing",
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        )),
    ];
    lines.extend(selection.singers.iter().enumerate().map(|(i, singer)| {
        Line::from(vec![
            Span::styled(format!("{}. ", i + 1), Style::default().fg(ACCENT)),
            Span::styled(
                layout::fit_to_width(&singer.nickname, layout::NICKNAME_COLUMN_WIDTH),
                Style::default().fg(TEXT),
            ),
            Span::styled(
                format!(" {:>3}  {}", singer.age, singer.gender),
                Style::default().fg(DIM),
            ),
        ])
    }));

    let title = match &selection.bucket {
        Some(bucket) => format!(" Your first song ({bucket}) "),
        None => " Your first song ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let height = lines.len() as u16 + 2;
    let area = layout::centered(area, layout::RESULT_WIDTH, height);
    frame.render_widget(Paragraph::new(lines).block(block).centered(), area);
}

fn draw_failure(frame: &mut Frame, error: &str, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Couldn't choose a song this time.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(error, Style::default().fg(TEXT))),
        Line::default(),
        Line::from(Span::styled(
            "Press r to try again, or h to start over.",
            Style::default().fg(DIM),
        )),
    ];
    let block = Block::default()
        .title(" Something went wrong ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let area = layout::centered(area, layout::RESULT_WIDTH, 9);
    let failure = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .centered();
    frame.render_widget(failure, area);
}
