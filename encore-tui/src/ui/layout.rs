use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::{UnicodeWidthChar as _, UnicodeWidthStr as _};

// ── Main vertical layout ────────────────────────────────────────────────────

pub const HEADER_HEIGHT: u16 = 1;
pub const CONTENT_MIN_HEIGHT: u16 = 3;
pub const HELP_BAR_HEIGHT: u16 = 1;

pub struct MainLayout {
    pub header: Rect,
    pub content: Rect,
    pub help_bar: Rect,
}

pub fn split_main(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(CONTENT_MIN_HEIGHT),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);
    MainLayout {
        header: chunks[0],
        content: chunks[1],
        help_bar: chunks[2],
    }
}

// ── Members screen ──────────────────────────────────────────────────────────

/// Three input rows plus the form's border.
pub const MEMBER_FORM_HEIGHT: u16 = 5;
pub const MEMBER_HINT_HEIGHT: u16 = 1;

pub struct MembersLayout {
    pub form: Rect,
    pub list: Rect,
    pub hint: Rect,
}

pub fn split_members(area: Rect) -> MembersLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(MEMBER_FORM_HEIGHT),
            Constraint::Min(CONTENT_MIN_HEIGHT),
            Constraint::Length(MEMBER_HINT_HEIGHT),
        ])
        .split(area);
    MembersLayout {
        form: chunks[0],
        list: chunks[1],
        hint: chunks[2],
    }
}

pub const FORM_LABEL_WIDTH: usize = 10;
pub const NICKNAME_MAX_CHARS: usize = 24;
pub const AGE_MAX_DIGITS: usize = 3;
/// Display width given to nicknames in the member and singer lists.
pub const NICKNAME_COLUMN_WIDTH: usize = 16;

// ── Centered boxes (settings, result, popups) ───────────────────────────────

pub const SETTINGS_WIDTH: u16 = 56;
pub const SETTINGS_HEIGHT: u16 = 7;
pub const RESULT_WIDTH: u16 = 60;

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

// ── Text ────────────────────────────────────────────────────────────────────

/// Truncate or pad `s` to exactly `width` display columns. Wide characters
/// (e.g. kana) count as two.
pub fn fit_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        let pad = width - s.width();
        return format!("{s}{}", " ".repeat(pad));
    }

    let mut out = String::new();
    let mut used = 0;
    let budget = width.saturating_sub(1);
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('\u{2026}');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

// ── Interaction constants ───────────────────────────────────────────────────

pub const PAGE_SCROLL_SIZE: usize = 20;

// ── Log view ────────────────────────────────────────────────────────────────

pub const LOG_TARGET_WIDTH: usize = 24;
pub const LOG_TARGET_SUFFIX_LEN: usize = 21;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_to_width_pads_short_text() {
        assert_eq!(fit_to_width("Taro", 6), "Taro  ");
    }

    #[test]
    fn fit_to_width_counts_wide_characters() {
        // Each kana is two columns wide.
        assert_eq!(fit_to_width("たろう", 6), "たろう");
        assert_eq!(fit_to_width("たろう", 5).width(), 5);
        assert!(fit_to_width("たろう", 5).ends_with('\u{2026}'));
    }

    #[test]
    fn centered_shrinks_to_fit() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 40, 40), area);
    }
}
