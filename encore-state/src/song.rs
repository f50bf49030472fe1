use serde::{Deserialize, Serialize};

use crate::api;

/// A song, as `encore` cares about it. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Song {
    /// The song title
    pub title: String,
    /// The performing artist
    pub artist: String,
    /// The release year
    pub year: i32,
    /// The genre
    pub genre: String,
}
impl Song {
    /// The decade the song was released in, e.g. `1990s` for 1999.
    pub fn decade(&self) -> String {
        format!("{}s", self.year.div_euclid(10) * 10)
    }
}
impl From<api::Song> for Song {
    fn from(song: api::Song) -> Self {
        Song {
            title: song.title,
            artist: song.artist,
            year: song.year,
            genre: song.genre,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decade_from_year() {
        let song = |year| Song {
            title: String::new(),
            artist: String::new(),
            year,
            genre: String::new(),
        };
        assert_eq!(song(1999).decade(), "1990s");
        assert_eq!(song(2000).decade(), "2000s");
        assert_eq!(song(2023).decade(), "2020s");
    }
}
