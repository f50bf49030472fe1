use rand::Rng;

use crate::{Gender, Member, MemberId};

/// A member as typed into the roster form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDraft {
    /// The nickname as entered.
    pub nickname: String,
    /// The selected gender.
    pub gender: Gender,
    /// The age as entered.
    pub age: String,
}
impl MemberDraft {
    /// The trimmed nickname and parsed age, if both are present and valid.
    fn validate(&self) -> Option<(String, u32)> {
        let nickname = self.nickname.trim();
        if nickname.is_empty() {
            return None;
        }
        let age = self.age.trim().parse::<u32>().ok().filter(|age| *age > 0)?;
        Some((nickname.to_string(), age))
    }
}

/// The ordered set of members for a session. Insertion order is display
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    members: Vec<Member>,
}
impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member from `draft`, returning its new ID.
    ///
    /// Returns `None` and leaves the roster untouched if the nickname is
    /// blank or the age isn't a positive integer.
    pub fn add(&mut self, draft: &MemberDraft) -> Option<MemberId> {
        self.add_with_rng(draft, &mut rand::rng())
    }

    /// [`Self::add`], drawing the ID from `rng`.
    pub fn add_with_rng<R: Rng + ?Sized>(
        &mut self,
        draft: &MemberDraft,
        rng: &mut R,
    ) -> Option<MemberId> {
        let (nickname, age) = draft.validate()?;

        let id = loop {
            let id = MemberId::generate(rng);
            if self.get(&id).is_none() {
                break id;
            }
        };

        self.members.push(Member {
            id: id.clone(),
            nickname,
            gender: draft.gender,
            age,
        });
        Some(id)
    }

    /// Remove the member with `id`. Does nothing if there isn't one.
    pub fn remove(&mut self, id: &MemberId) {
        self.members.retain(|m| &m.id != id);
    }

    /// Remove everyone.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Whether the roster can be submitted, i.e. has at least one member.
    pub fn is_complete(&self) -> bool {
        !self.members.is_empty()
    }

    /// The members, in insertion order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Look up a member by ID.
    pub fn get(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    /// The number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether there are no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The sum of all ages.
    pub fn age_sum(&self) -> u64 {
        self.members.iter().map(|m| m.age as u64).sum()
    }

    /// The arithmetic mean age, or `None` for an empty roster.
    pub fn mean_age(&self) -> Option<f64> {
        if self.members.is_empty() {
            return None;
        }
        Some(self.age_sum() as f64 / self.members.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng as _, rngs::StdRng};

    use super::*;

    fn draft(nickname: &str, age: &str) -> MemberDraft {
        MemberDraft {
            nickname: nickname.to_string(),
            gender: Gender::Other,
            age: age.to_string(),
        }
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut roster = Roster::new();
        roster.add(&draft("Taro", "25")).unwrap();
        roster.add(&draft("Hanako", "31")).unwrap();
        roster.add(&draft("Jiro", "19")).unwrap();

        let names: Vec<_> = roster.members().iter().map(|m| m.nickname.as_str()).collect();
        assert_eq!(names, ["Taro", "Hanako", "Jiro"]);
    }

    #[test]
    fn empty_nickname_is_a_no_op() {
        let mut roster = Roster::new();
        assert_eq!(roster.add(&draft("", "25")), None);
        assert_eq!(roster.add(&draft("   ", "25")), None);
        assert_eq!(roster.len(), 0);
        assert!(!roster.is_complete());
    }

    #[test]
    fn missing_or_invalid_age_is_a_no_op() {
        let mut roster = Roster::new();
        roster.add(&draft("Taro", "25")).unwrap();
        for age in ["", "abc", "0", "-3", "2.5"] {
            assert_eq!(roster.add(&draft("Hanako", age)), None, "age {age:?}");
        }
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn nickname_and_age_are_trimmed() {
        let mut roster = Roster::new();
        let id = roster.add(&draft("  Taro ", " 42 ")).unwrap();
        let member = roster.get(&id).unwrap();
        assert_eq!(member.nickname, "Taro");
        assert_eq!(member.age, 42);
    }

    #[test]
    fn ids_are_unique() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut roster = Roster::new();
        for i in 0..200 {
            roster
                .add_with_rng(&draft(&format!("member {i}"), "30"), &mut rng)
                .unwrap();
        }
        let mut ids: Vec<_> = roster.members().iter().map(|m| m.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut roster = Roster::new();
        let taro = roster.add(&draft("Taro", "25")).unwrap();
        roster.add(&draft("Hanako", "31")).unwrap();

        roster.remove(&taro);
        assert_eq!(roster.len(), 1);
        roster.remove(&taro);
        assert_eq!(roster.len(), 1);
        roster.remove(&MemberId("missing00".to_string()));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.members()[0].nickname, "Hanako");
    }

    #[test]
    fn mean_age() {
        let mut roster = Roster::new();
        assert_eq!(roster.mean_age(), None);
        roster.add(&draft("A", "50")).unwrap();
        roster.add(&draft("B", "48")).unwrap();
        assert_eq!(roster.age_sum(), 98);
        assert_eq!(roster.mean_age(), Some(49.0));
    }
}
