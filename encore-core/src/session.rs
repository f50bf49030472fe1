use encore_state::{MemberDraft, MemberId, Preferences, Roster};
use rand::{SeedableRng as _, rngs::StdRng};

/// The screens of a session, in the order they're visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Home,
    Members,
    Settings,
    Result,
}
impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Home => "Home",
            Step::Members => "Members",
            Step::Settings => "Settings",
            Step::Result => "Result",
        }
    }
}
impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the group is in the flow, plus what they've entered so far.
///
/// Transitions only move forward one step at a time; [`Session::reset`]
/// goes back to the start and forgets everything.
///
/// Member IDs come from the session's own RNG, so a seeded session hands out
/// the same IDs every run.
#[derive(Debug, Clone)]
pub struct Session {
    step: Step,
    pub roster: Roster,
    preferences: Option<Preferences>,
    rng: StdRng,
}
impl Default for Session {
    fn default() -> Self {
        Self::with_seed(None)
    }
}
impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: Option<u64>) -> Self {
        Self {
            step: Step::Home,
            roster: Roster::default(),
            preferences: None,
            rng: match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            },
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// The preferences, once the settings step has been completed.
    pub fn preferences(&self) -> Option<&Preferences> {
        self.preferences.as_ref()
    }

    /// Home -> Members.
    pub fn start(&mut self) -> bool {
        self.advance(Step::Home, Step::Members)
    }

    /// Members -> Settings, only with a non-empty roster.
    pub fn complete_members(&mut self) -> bool {
        self.roster.is_complete() && self.advance(Step::Members, Step::Settings)
    }

    /// Settings -> Result, replacing any earlier preferences.
    pub fn complete_settings(&mut self, preferences: Preferences) -> bool {
        if !self.advance(Step::Settings, Step::Result) {
            return false;
        }
        self.preferences = Some(preferences);
        true
    }

    /// Add a member to the roster, with an ID from the session RNG. Invalid
    /// drafts are ignored.
    pub fn add_member(&mut self, draft: &MemberDraft) -> Option<MemberId> {
        self.roster.add_with_rng(draft, &mut self.rng)
    }

    /// Back to Home with an empty roster and no preferences. The RNG carries
    /// on where it was.
    pub fn reset(&mut self) {
        self.step = Step::Home;
        self.roster.clear();
        self.preferences = None;
    }

    fn advance(&mut self, from: Step, to: Step) -> bool {
        if self.step != from {
            tracing::debug!("ignoring {from} -> {to} transition while on {}", self.step);
            return false;
        }
        self.step = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use encore_state::{Gender, Mood};

    use super::*;

    fn draft(nickname: &str) -> MemberDraft {
        MemberDraft {
            nickname: nickname.to_string(),
            gender: Gender::Male,
            age: "25".to_string(),
        }
    }

    fn add_member(session: &mut Session) {
        session.add_member(&draft("Taro")).unwrap();
    }

    #[test]
    fn walks_through_all_steps() {
        let mut session = Session::new();
        assert_eq!(session.step(), Step::Home);

        assert!(session.start());
        assert_eq!(session.step(), Step::Members);

        add_member(&mut session);
        assert!(session.complete_members());
        assert_eq!(session.step(), Step::Settings);

        let preferences = Preferences {
            mood: Mood::Classics,
            ..Default::default()
        };
        assert!(session.complete_settings(preferences));
        assert_eq!(session.step(), Step::Result);
        assert_eq!(session.preferences(), Some(&preferences));
    }

    #[test]
    fn members_step_needs_a_member() {
        let mut session = Session::new();
        session.start();
        assert!(!session.complete_members());
        assert_eq!(session.step(), Step::Members);
    }

    #[test]
    fn out_of_order_transitions_are_ignored() {
        let mut session = Session::new();
        add_member(&mut session);
        assert!(!session.complete_members());
        assert!(!session.complete_settings(Preferences::default()));
        assert_eq!(session.step(), Step::Home);
        assert_eq!(session.preferences(), None);
    }

    #[test]
    fn reset_forgets_everything() {
        let mut session = Session::new();
        session.start();
        add_member(&mut session);
        session.complete_members();
        session.complete_settings(Preferences::default());

        session.reset();
        assert_eq!(session.step(), Step::Home);
        assert!(session.roster.is_empty());
        assert_eq!(session.preferences(), None);
    }

    #[test]
    fn seeded_sessions_hand_out_the_same_member_ids() {
        let mut a = Session::with_seed(Some(42));
        let mut b = Session::with_seed(Some(42));
        for name in ["Taro", "Hanako", "Jiro"] {
            assert_eq!(a.add_member(&draft(name)), b.add_member(&draft(name)));
        }
        assert_eq!(a.roster.len(), 3);
        assert_eq!(a.add_member(&draft("  ")), None);
    }

    #[test]
    fn reset_keeps_drawing_from_the_same_rng() {
        let mut session = Session::with_seed(Some(1));
        let first = session.add_member(&draft("Taro"));
        session.reset();
        let after_reset = session.add_member(&draft("Taro"));

        assert!(first.is_some());
        assert_ne!(first, after_reset);
        assert_eq!(session.roster.len(), 1);
    }
}
