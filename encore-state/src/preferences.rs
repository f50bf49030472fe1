use serde::{Deserialize, Serialize};

use crate::api;

/// The mood the group is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mood {
    /// Recent chart hits.
    #[default]
    #[serde(rename = "最新ヒット")]
    LatestHits,
    /// Standards and nostalgic favourites.
    #[serde(rename = "定番曲・懐メロ")]
    Classics,
    /// Enka and Showa-era pop.
    #[serde(rename = "演歌・昭和歌謡")]
    EnkaShowa,
}
impl Mood {
    /// Every mood, in the order the UI offers them.
    pub const ALL: [Mood; 3] = [Mood::LatestHits, Mood::Classics, Mood::EnkaShowa];

    /// Returns a human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::LatestHits => "Latest hits",
            Mood::Classics => "Classics & nostalgia",
            Mood::EnkaShowa => "Enka & Showa pop",
        }
    }

    /// The label sent to the recommendation backend.
    pub fn wire_value(&self) -> &'static str {
        match self {
            Mood::LatestHits => "最新ヒット",
            Mood::Classics => "定番曲・懐メロ",
            Mood::EnkaShowa => "演歌・昭和歌謡",
        }
    }

    /// The next mood, wrapping around.
    pub fn next(self) -> Self {
        crate::cycle(&Self::ALL, self, true)
    }

    /// The previous mood, wrapping around.
    pub fn prev(self) -> Self {
        crate::cycle(&Self::ALL, self, false)
    }
}
impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who the group is singing with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Situation {
    /// A night out with friends.
    #[default]
    #[serde(rename = "友人と")]
    WithFriends,
    /// A date.
    #[serde(rename = "恋人と")]
    WithPartner,
    /// A family outing.
    #[serde(rename = "家族と")]
    WithFamily,
    /// After-work karaoke.
    #[serde(rename = "会社の人と")]
    WithColleagues,
}
impl Situation {
    /// Every situation, in the order the UI offers them.
    pub const ALL: [Situation; 4] = [
        Situation::WithFriends,
        Situation::WithPartner,
        Situation::WithFamily,
        Situation::WithColleagues,
    ];

    /// Returns a human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Situation::WithFriends => "With friends",
            Situation::WithPartner => "With a partner",
            Situation::WithFamily => "With family",
            Situation::WithColleagues => "With colleagues",
        }
    }

    /// The label sent to the recommendation backend.
    pub fn wire_value(&self) -> &'static str {
        match self {
            Situation::WithFriends => "友人と",
            Situation::WithPartner => "恋人と",
            Situation::WithFamily => "家族と",
            Situation::WithColleagues => "会社の人と",
        }
    }

    /// The next situation, wrapping around.
    pub fn next(self) -> Self {
        crate::cycle(&Self::ALL, self, true)
    }

    /// The previous situation, wrapping around.
    pub fn prev(self) -> Self {
        crate::cycle(&Self::ALL, self, false)
    }
}
impl std::fmt::Display for Situation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A mic count outside `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMicCount(pub u8);
impl std::fmt::Display for InvalidMicCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mic count must be between {} and {}, got {}",
            MicCount::MIN.0,
            MicCount::MAX.0,
            self.0
        )
    }
}
impl std::error::Error for InvalidMicCount {}

/// How many people sing the chosen song. Always between 1 and 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MicCount(u8);
impl MicCount {
    /// The smallest allowed count.
    pub const MIN: MicCount = MicCount(1);
    /// The largest allowed count.
    pub const MAX: MicCount = MicCount(4);
    /// Every allowed count, ascending.
    pub const ALL: [MicCount; 4] = [MicCount(1), MicCount(2), MicCount(3), MicCount(4)];

    /// The count as a plain integer.
    pub fn get(self) -> u8 {
        self.0
    }

    /// The next count, wrapping from 4 back to 1.
    pub fn next(self) -> Self {
        crate::cycle(&Self::ALL, self, true)
    }

    /// The previous count, wrapping from 1 to 4.
    pub fn prev(self) -> Self {
        crate::cycle(&Self::ALL, self, false)
    }
}
impl Default for MicCount {
    fn default() -> Self {
        Self::MIN
    }
}
impl TryFrom<u8> for MicCount {
    type Error = InvalidMicCount;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(MicCount(value))
        } else {
            Err(InvalidMicCount(value))
        }
    }
}
impl From<MicCount> for u8 {
    fn from(count: MicCount) -> Self {
        count.0
    }
}
impl std::fmt::Display for MicCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The group's preferences. Replaced wholesale whenever the settings step
/// is redone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// The mood.
    pub mood: Mood,
    /// The situation.
    pub situation: Situation,
    /// How many singers to pick.
    pub mic_count: MicCount,
}
impl From<&Preferences> for api::Settings {
    fn from(preferences: &Preferences) -> Self {
        api::Settings {
            mood: preferences.mood.wire_value().to_string(),
            situation: preferences.situation.wire_value().to_string(),
            mic_count: preferences.mic_count.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mic_count_rejects_values_outside_range() {
        assert_eq!(MicCount::try_from(0), Err(InvalidMicCount(0)));
        assert_eq!(MicCount::try_from(5), Err(InvalidMicCount(5)));
        for n in 1..=4 {
            assert_eq!(MicCount::try_from(n).map(MicCount::get), Ok(n));
        }
    }

    #[test]
    fn mic_count_cycles() {
        assert_eq!(MicCount::MAX.next(), MicCount::MIN);
        assert_eq!(MicCount::MIN.prev(), MicCount::MAX);
        assert_eq!(MicCount::MIN.next().get(), 2);
    }

    #[test]
    fn defaults_match_the_settings_screen() {
        let preferences = Preferences::default();
        assert_eq!(preferences.mood, Mood::LatestHits);
        assert_eq!(preferences.situation, Situation::WithFriends);
        assert_eq!(preferences.mic_count.get(), 1);
    }

    #[test]
    fn settings_wire_form_uses_backend_labels() {
        let preferences = Preferences {
            mood: Mood::EnkaShowa,
            situation: Situation::WithColleagues,
            mic_count: MicCount::try_from(3).unwrap(),
        };
        let settings = api::Settings::from(&preferences);
        assert_eq!(settings.mood, "演歌・昭和歌謡");
        assert_eq!(settings.situation, "会社の人と");
        assert_eq!(settings.mic_count, 3);
    }

    #[test]
    fn serde_labels_agree_with_wire_values() {
        for mood in Mood::ALL {
            let label = toml::Value::try_from(mood).unwrap();
            assert_eq!(label.as_str(), Some(mood.wire_value()));
        }
        for situation in Situation::ALL {
            let label = toml::Value::try_from(situation).unwrap();
            assert_eq!(label.as_str(), Some(situation.wire_value()));
        }
    }
}
