use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::api;

/// A member ID. Opaque, and unique within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub String);
impl MemberId {
    /// Length of a generated ID.
    pub const LEN: usize = 9;
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    /// Generate a fresh lowercase base36 ID.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let id = (0..Self::LEN)
            .map(|_| Self::CHARSET[rng.random_range(0..Self::CHARSET.len())] as char)
            .collect();
        MemberId(id)
    }
}
impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A member's gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male.
    #[default]
    Male,
    /// Female.
    Female,
    /// Anything else, or undisclosed.
    Other,
}
impl Gender {
    /// Every gender, in the order the UI offers them.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Returns a human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// The value sent to the recommendation backend.
    pub fn wire_value(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// The next gender in [`Self::ALL`], wrapping around.
    pub fn next(self) -> Self {
        crate::cycle(&Self::ALL, self, true)
    }

    /// The previous gender in [`Self::ALL`], wrapping around.
    pub fn prev(self) -> Self {
        crate::cycle(&Self::ALL, self, false)
    }
}
impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered participant. Immutable once added to a roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// The member ID
    pub id: MemberId,
    /// The display name, never empty
    pub nickname: String,
    /// The member's gender
    pub gender: Gender,
    /// Age in years, always positive
    pub age: u32,
}
impl From<&Member> for api::Member {
    fn from(member: &Member) -> Self {
        api::Member {
            id: member.id.0.clone(),
            nickname: member.nickname.clone(),
            gender: member.gender.wire_value().to_string(),
            age: member.age,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng as _, rngs::StdRng};

    use super::*;

    #[test]
    fn generated_ids_are_base36() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let id = MemberId::generate(&mut rng);
            assert_eq!(id.0.len(), MemberId::LEN);
            assert!(
                id.0.chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
            );
        }
    }

    #[test]
    fn gender_cycles_in_both_directions() {
        assert_eq!(Gender::Male.next(), Gender::Female);
        assert_eq!(Gender::Other.next(), Gender::Male);
        assert_eq!(Gender::Male.prev(), Gender::Other);
    }

    #[test]
    fn member_converts_to_wire_form() {
        let member = Member {
            id: MemberId("k3j9x0abc".to_string()),
            nickname: "Hanako".to_string(),
            gender: Gender::Female,
            age: 31,
        };
        let wire = api::Member::from(&member);
        assert_eq!(wire.id, "k3j9x0abc");
        assert_eq!(wire.gender, "female");
        assert_eq!(wire.age, 31);
    }
}
