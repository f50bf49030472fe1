use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{ACCENT, DIM, TEXT, layout};

const PENGUIN: &[&str] = &[
    r"   .--.   ",
    r"  |o  o|  ",
    r"  |:\/ |  ",
    r" //   \ \ ",
    r"(|     | )",
    r"/'\_ _/`\ ",
    r"\___)=(___/",
];

const FEATURES: &[&str] = &[
    "A crowd-pleasing first song, picked for your group's generation",
    "Who sings it, drawn at random",
    "One to four singers, to match your mics",
];

/// Art and features plus the title, blurb, prompt and three blank lines.
const HEIGHT: u16 = PENGUIN.len() as u16 + FEATURES.len() as u16 + 6;

pub fn draw(frame: &mut Frame, tick_count: u64, area: Rect) {
    // Waddle one column left and right.
    let (left, right) = if tick_count / 5 % 2 == 0 {
        ("  ", "")
    } else {
        ("", "  ")
    };

    let mut lines: Vec<Line> = PENGUIN
        .iter()
        .map(|row| {
            Line::from(Span::styled(
                format!("{left}{row}{right}"),
                Style::default().fg(TEXT),
            ))
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("\u{266A} ", Style::default().fg(ACCENT)),
        Span::styled(
            "First Singin'!",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" \u{266B}", Style::default().fg(ACCENT)),
    ]));
    lines.push(Line::from(Span::styled(
        "No more dithering. We'll pick your group's first song.",
        Style::default().fg(DIM),
    )));
    lines.push(Line::default());
    lines.extend(FEATURES.iter().map(|feature| {
        Line::from(vec![
            Span::styled("\u{2713} ", Style::default().fg(ACCENT)),
            Span::styled(*feature, Style::default().fg(TEXT)),
        ])
    }));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Press Enter to start",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));

    let area = layout::centered(area, area.width, HEIGHT);
    frame.render_widget(Paragraph::new(lines).centered(), area);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn rendered(width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| draw(frame, 0, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn lists_what_every_strategy_does() {
        let screen = rendered(80, HEIGHT);
        assert!(screen.contains("First Singin'!"));
        assert!(screen.contains("One to four singers, to match your mics"));
        assert!(!screen.to_lowercase().contains("mood"));
    }
}
