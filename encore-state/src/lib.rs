//! The data a karaoke session is built from: the roster of members, the
//! group's preferences, and the song catalog the local picker draws from.
//!
//! Separated out so the selection logic and the UI can share it.
#![deny(missing_docs)]

pub use encore_api as api;

mod catalog;
pub use catalog::{Catalog, CatalogError, Tier};

mod member;
pub use member::{Gender, Member, MemberId};

mod preferences;
pub use preferences::{InvalidMicCount, MicCount, Mood, Preferences, Situation};

mod roster;
pub use roster::{MemberDraft, Roster};

mod song;
pub use song::Song;

/// Step through `all` from `current`, wrapping at either end.
pub(crate) fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let len = all.len();
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    all[next]
}
