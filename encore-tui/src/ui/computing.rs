//! The "choosing a song" screen shown while a selection is in flight.
//!
//! A handful of notes bob in a wave above the title, with animated dots in
//! the status line below.

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{ACCENT, DIM};

const NOTES: &[char] = &['\u{266A}', '\u{266B}', '\u{2669}', '\u{266C}'];

/// Horizontal offsets of each note from the center.
const STAFF: &[i16] = &[-12, -8, -4, 0, 4, 8, 12];

/// Vertical displacement over one cycle of the wave.
const SINE_TABLE: &[i16] = &[0, 1, 2, 2, 2, 1, 0, 0];

const WAVE_HEIGHT: u16 = 3;

/// Wave + blank line + title + status.
const TOTAL_HEIGHT: u16 = WAVE_HEIGHT + 1 + 1 + 1;

pub fn draw(frame: &mut Frame, tick_count: u64, strategy: &str, area: Rect) {
    if area.width < 4 || area.height < TOTAL_HEIGHT {
        draw_minimal(frame, tick_count, area);
        return;
    }

    let top_y = area.y + (area.height.saturating_sub(TOTAL_HEIGHT)) / 2;
    let center_x = area.x + area.width / 2;

    let wave_area = Rect::new(area.x, top_y, area.width, WAVE_HEIGHT);
    draw_wave(frame.buffer_mut(), tick_count, ACCENT, center_x, wave_area);

    let title_y = top_y + WAVE_HEIGHT + 1;
    let title = Paragraph::new(Line::from(Span::styled(
        "Choosing the perfect song",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )))
    .centered();
    frame.render_widget(title, Rect::new(area.x, title_y, area.width, 1));

    let status = Paragraph::new(Line::from(Span::styled(
        status_text(tick_count, strategy),
        Style::default().fg(DIM),
    )))
    .centered();
    frame.render_widget(status, Rect::new(area.x, title_y + 1, area.width, 1));
}

fn draw_wave(buf: &mut Buffer, tick_count: u64, color: Color, cx: u16, area: Rect) {
    let tick = tick_count as usize;

    for (i, &dx) in STAFF.iter().enumerate() {
        let phase = (tick + i * 2) % SINE_TABLE.len();
        let x = cx as i16 + dx;
        let y = area.y as i16 + SINE_TABLE[phase];

        if x >= area.x as i16
            && x < (area.x + area.width) as i16
            && y >= area.y as i16
            && y < (area.y + area.height) as i16
        {
            let cell = &mut buf[(x as u16, y as u16)];
            cell.set_char(NOTES[i % NOTES.len()]);
            cell.set_fg(color);
        }
    }
}

/// Padded to a fixed width so the centered text doesn't jitter as the dots
/// cycle.
fn status_text(tick_count: u64, strategy: &str) -> String {
    let dot_count = (tick_count / 5 % 4 + 1) as usize;
    let dots = ".".repeat(dot_count);
    let pad = " ".repeat(4 - dot_count);
    format!("asking the {strategy} picker{dots}{pad}")
}

fn draw_minimal(frame: &mut Frame, tick_count: u64, area: Rect) {
    let dot_count = (tick_count / 5 % 4 + 1) as usize;
    let text = format!("choosing{}", ".".repeat(dot_count));
    let paragraph = Paragraph::new(text).style(Style::default().fg(DIM));
    frame.render_widget(paragraph, area);
}
