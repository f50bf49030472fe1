//! Picking a song and the people who sing it.
//!
//! There are two interchangeable strategies behind [`Strategy`]: a local
//! one that draws from a [`Catalog`] by mean age, and a remote one that
//! asks the recommendation backend and checks its answer against the
//! roster.
use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
};

use encore_api as api;
use encore_state::{Catalog, Member, MemberId, MicCount, Preferences, Roster, Song};
use rand::{
    Rng, SeedableRng as _,
    rngs::StdRng,
    seq::{IndexedRandom as _, SliceRandom as _},
};
use serde::{Deserialize, Serialize};

/// One proposal: a song and who sings it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub song: Song,
    /// Drawn without replacement from the roster, in singing order.
    pub singers: Vec<Member>,
    /// The catalog bucket the song came from; `None` for remote picks.
    pub bucket: Option<String>,
}

#[derive(Debug)]
pub enum SelectionError {
    /// There was nobody to pick from.
    EmptyRoster,
    /// The bucket for this roster has no songs.
    EmptyBucket { bucket: String },
    /// The backend could not be reached or gave an unusable answer.
    Client(api::ClientError),
    /// The backend named a singer who isn't on the roster.
    UnknownSinger(MemberId),
    /// The backend named the same singer twice.
    DuplicateSinger(MemberId),
    /// The backend returned a different number of singers than asked for.
    SingerCountMismatch { expected: usize, received: usize },
}
impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::EmptyRoster => write!(f, "the roster is empty"),
            SelectionError::EmptyBucket { bucket } => {
                write!(f, "bucket `{bucket}` has no songs")
            }
            SelectionError::Client(e) => write!(f, "recommendation request failed: {e}"),
            SelectionError::UnknownSinger(id) => {
                write!(f, "backend picked singer `{id}`, who is not on the roster")
            }
            SelectionError::DuplicateSinger(id) => {
                write!(f, "backend picked singer `{id}` more than once")
            }
            SelectionError::SingerCountMismatch { expected, received } => {
                write!(f, "backend picked {received} singers, expected {expected}")
            }
        }
    }
}
impl std::error::Error for SelectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SelectionError::Client(e) => Some(e),
            _ => None,
        }
    }
}
impl From<api::ClientError> for SelectionError {
    fn from(e: api::ClientError) -> Self {
        SelectionError::Client(e)
    }
}
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Which strategy to use, as named in the config file and on the command
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Local,
    Remote,
}
impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Local => "local",
            StrategyKind::Remote => "remote",
        }
    }
}
impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(StrategyKind::Local),
            "remote" => Ok(StrategyKind::Remote),
            other => Err(format!(
                "unknown strategy `{other}`, expected `local` or `remote`"
            )),
        }
    }
}

/// How many singers a selection for `roster` must have: the mic count,
/// clamped to the roster size.
pub fn singer_count(roster: &Roster, mic_count: MicCount) -> usize {
    (mic_count.get() as usize).min(roster.len())
}

/// Shuffle `members` and keep the first `mic_count`.
pub fn pick_singers<R: Rng + ?Sized>(
    members: &[Member],
    mic_count: MicCount,
    rng: &mut R,
) -> Vec<Member> {
    let mut singers = members.to_vec();
    singers.shuffle(rng);
    singers.truncate(mic_count.get() as usize);
    singers
}

/// Pick a song from the bucket matching the roster's mean age, uniformly at
/// random, then pick the singers independently.
pub fn select_local<R: Rng + ?Sized>(
    catalog: &Catalog,
    roster: &Roster,
    preferences: &Preferences,
    rng: &mut R,
) -> SelectionResult<Selection> {
    let tier = catalog
        .tier_for_ages(roster.age_sum(), roster.len())
        .ok_or(SelectionError::EmptyRoster)?;
    let song = tier
        .songs
        .choose(rng)
        .cloned()
        .ok_or_else(|| SelectionError::EmptyBucket {
            bucket: tier.bucket.clone(),
        })?;
    let singers = pick_singers(roster.members(), preferences.mic_count, rng);

    Ok(Selection {
        song,
        singers,
        bucket: Some(tier.bucket.clone()),
    })
}

/// Check a backend response against the roster it was computed from.
///
/// The singers must be distinct roster members and there must be exactly
/// [`singer_count`] of them. The roster's copy of each member is used, not
/// the backend's.
pub fn validate_response(
    roster: &Roster,
    preferences: &Preferences,
    response: api::RecommendResponse,
) -> SelectionResult<Selection> {
    let expected = singer_count(roster, preferences.mic_count);
    let received = response.selected_singers.len();
    if received != expected {
        return Err(SelectionError::SingerCountMismatch { expected, received });
    }

    let mut seen = HashSet::new();
    let mut singers = Vec::with_capacity(received);
    for singer in response.selected_singers {
        let id = MemberId(singer.id);
        let Some(member) = roster.get(&id) else {
            return Err(SelectionError::UnknownSinger(id));
        };
        if !seen.insert(id.clone()) {
            return Err(SelectionError::DuplicateSinger(id));
        }
        singers.push(member.clone());
    }

    Ok(Selection {
        song: Song::from(response.selected_song),
        singers,
        bucket: None,
    })
}

/// Draws from a [`Catalog`] with its own random number generator.
#[derive(Clone)]
pub struct LocalStrategy {
    catalog: Arc<Catalog>,
    rng: Arc<Mutex<StdRng>>,
}
impl LocalStrategy {
    /// A fixed `seed` makes every draw reproducible; otherwise the
    /// generator is seeded from the OS.
    pub fn new(catalog: Catalog, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            catalog: Arc::new(catalog),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn select(&self, roster: &Roster, preferences: &Preferences) -> SelectionResult<Selection> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        select_local(&self.catalog, roster, preferences, &mut *rng)
    }
}

/// Delegates to the recommendation backend.
#[derive(Clone)]
pub struct RemoteStrategy {
    client: Arc<api::Client>,
}
impl RemoteStrategy {
    pub fn new(client: api::Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub async fn select(
        &self,
        roster: &Roster,
        preferences: &Preferences,
    ) -> SelectionResult<Selection> {
        if roster.is_empty() {
            return Err(SelectionError::EmptyRoster);
        }

        let request = api::RecommendRequest {
            members: roster.members().iter().map(api::Member::from).collect(),
            settings: api::Settings::from(preferences),
        };
        tracing::debug!(
            "requesting recommendation for {} members from {}",
            request.members.len(),
            self.client.base_url()
        );
        let response = self.client.recommend_songs(&request).await?;
        validate_response(roster, preferences, response)
    }
}

/// The selection procedure: `select(roster, preferences)`.
#[derive(Clone)]
pub enum Strategy {
    Local(LocalStrategy),
    Remote(RemoteStrategy),
}
impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Local(_) => StrategyKind::Local,
            Strategy::Remote(_) => StrategyKind::Remote,
        }
    }

    pub async fn select(
        &self,
        roster: &Roster,
        preferences: &Preferences,
    ) -> SelectionResult<Selection> {
        match self {
            Strategy::Local(local) => local.select(roster, preferences),
            Strategy::Remote(remote) => remote.select(roster, preferences).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use axum::{Json, Router, routing::post};
    use encore_state::{Gender, MemberDraft};
    use proptest::prelude::*;
    use serde_json::{Value, json};

    use super::*;

    fn roster_with_ages(ages: &[u32], rng: &mut StdRng) -> Roster {
        let mut roster = Roster::new();
        for (i, age) in ages.iter().enumerate() {
            let draft = MemberDraft {
                nickname: format!("singer {i}"),
                gender: Gender::ALL[i % Gender::ALL.len()],
                age: age.to_string(),
            };
            roster.add_with_rng(&draft, rng).unwrap();
        }
        roster
    }

    fn preferences(mic_count: u8) -> Preferences {
        Preferences {
            mic_count: MicCount::try_from(mic_count).unwrap(),
            ..Default::default()
        }
    }

    fn expected_bucket(ages: &[u32]) -> &'static str {
        let mean = ages.iter().map(|a| *a as f64).sum::<f64>() / ages.len() as f64;
        if mean >= 45.0 {
            "1990s"
        } else if mean >= 35.0 {
            "2000s"
        } else if mean >= 25.0 {
            "2010s"
        } else {
            "2020s"
        }
    }

    proptest! {
        #[test]
        fn local_selection_invariants(
            ages in proptest::collection::vec(1u32..100, 1..12),
            mic_count in 1u8..=4,
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let roster = roster_with_ages(&ages, &mut rng);
            let catalog = Catalog::builtin();
            let selection = select_local(&catalog, &roster, &preferences(mic_count), &mut rng).unwrap();

            prop_assert_eq!(selection.singers.len(), (mic_count as usize).min(ages.len()));
            let ids: HashSet<_> = selection.singers.iter().map(|s| s.id.clone()).collect();
            prop_assert_eq!(ids.len(), selection.singers.len());
            for singer in &selection.singers {
                prop_assert_eq!(roster.get(&singer.id), Some(singer));
            }

            let bucket = expected_bucket(&ages);
            prop_assert_eq!(selection.bucket.as_deref(), Some(bucket));
            prop_assert!(catalog.tier(bucket).unwrap().songs.contains(&selection.song));
        }
    }

    #[test]
    fn older_group_gets_the_oldest_bucket() {
        let mut rng = StdRng::seed_from_u64(3);
        let roster = roster_with_ages(&[50, 48], &mut rng);
        let catalog = Catalog::builtin();
        let nineties = &catalog.tier("1990s").unwrap().songs;

        for _ in 0..20 {
            let selection = select_local(&catalog, &roster, &preferences(2), &mut rng).unwrap();
            assert!(nineties.contains(&selection.song));
        }
    }

    #[test]
    fn singers_are_clamped_to_roster_size() {
        let mut rng = StdRng::seed_from_u64(4);
        let roster = roster_with_ages(&[30], &mut rng);
        let selection =
            select_local(&Catalog::builtin(), &roster, &preferences(4), &mut rng).unwrap();
        assert_eq!(selection.singers.len(), 1);
        assert_eq!(selection.singers[0], roster.members()[0]);
    }

    #[test]
    fn empty_roster_is_an_error() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            select_local(&Catalog::builtin(), &Roster::new(), &preferences(1), &mut rng),
            Err(SelectionError::EmptyRoster)
        ));
    }

    #[test]
    fn repeated_draws_stay_in_bucket_but_vary() {
        let mut rng = StdRng::seed_from_u64(6);
        let roster = roster_with_ages(&[20, 22, 23, 21], &mut rng);
        let strategy = LocalStrategy::new(Catalog::builtin(), Some(99));

        let mut songs = HashSet::new();
        let mut orders = HashSet::new();
        for _ in 0..50 {
            let selection = strategy.select(&roster, &preferences(4)).unwrap();
            assert_eq!(selection.bucket.as_deref(), Some("2020s"));
            songs.insert(selection.song.title.clone());
            orders.insert(
                selection
                    .singers
                    .iter()
                    .map(|s| s.id.clone())
                    .collect::<Vec<_>>(),
            );
        }
        assert!(songs.len() > 1);
        assert!(orders.len() > 1);
    }

    #[test]
    fn seeded_strategies_are_reproducible() {
        let mut rng = StdRng::seed_from_u64(7);
        let roster = roster_with_ages(&[30, 40, 50], &mut rng);
        let a = LocalStrategy::new(Catalog::builtin(), Some(42));
        let b = LocalStrategy::new(Catalog::builtin(), Some(42));
        for _ in 0..10 {
            assert_eq!(
                a.select(&roster, &preferences(2)).unwrap(),
                b.select(&roster, &preferences(2)).unwrap()
            );
        }
    }

    #[test]
    fn strategy_kind_parses() {
        assert_eq!("local".parse(), Ok(StrategyKind::Local));
        assert_eq!("remote".parse(), Ok(StrategyKind::Remote));
        assert!("cloud".parse::<StrategyKind>().is_err());
    }

    fn response_naming(ids: &[&str]) -> api::RecommendResponse {
        api::RecommendResponse {
            selected_song: api::Song {
                title: "Lemon".to_string(),
                artist: "米津玄師".to_string(),
                year: 2018,
                genre: "J-Pop".to_string(),
            },
            selected_singers: ids
                .iter()
                .map(|id| api::Member {
                    id: id.to_string(),
                    nickname: "from backend".to_string(),
                    gender: "other".to_string(),
                    age: 99,
                })
                .collect(),
        }
    }

    #[test]
    fn response_singers_come_from_the_roster() {
        let mut rng = StdRng::seed_from_u64(8);
        let roster = roster_with_ages(&[30, 31, 32], &mut rng);
        let second = roster.members()[1].clone();

        let selection =
            validate_response(&roster, &preferences(1), response_naming(&[&second.id.0])).unwrap();
        assert_eq!(selection.singers, vec![second]);
        assert_eq!(selection.song.title, "Lemon");
        assert_eq!(selection.bucket, None);
    }

    #[test]
    fn response_with_unknown_singer_is_rejected() {
        let mut rng = StdRng::seed_from_u64(9);
        let roster = roster_with_ages(&[30, 31], &mut rng);
        assert!(matches!(
            validate_response(&roster, &preferences(1), response_naming(&["stranger1"])),
            Err(SelectionError::UnknownSinger(id)) if id.0 == "stranger1"
        ));
    }

    #[test]
    fn response_with_duplicate_singer_is_rejected() {
        let mut rng = StdRng::seed_from_u64(10);
        let roster = roster_with_ages(&[30, 31], &mut rng);
        let id = roster.members()[0].id.0.clone();
        assert!(matches!(
            validate_response(&roster, &preferences(2), response_naming(&[&id, &id])),
            Err(SelectionError::DuplicateSinger(_))
        ));
    }

    #[test]
    fn response_with_wrong_singer_count_is_rejected() {
        let mut rng = StdRng::seed_from_u64(11);
        let roster = roster_with_ages(&[30, 31, 32], &mut rng);
        let ids: Vec<_> = roster.members().iter().map(|m| m.id.0.clone()).collect();
        assert!(matches!(
            validate_response(&roster, &preferences(1), response_naming(&[&ids[0], &ids[1]])),
            Err(SelectionError::SingerCountMismatch {
                expected: 1,
                received: 2
            })
        ));
        assert!(matches!(
            validate_response(&roster, &preferences(3), response_naming(&[&ids[0]])),
            Err(SelectionError::SingerCountMismatch {
                expected: 3,
                received: 1
            })
        ));
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn remote_strategy_echoes_backend_pick() {
        // Picks the last member of whatever roster it is sent.
        let router = Router::new().route(
            "/api/recommend-songs",
            post(|Json(body): Json<Value>| async move {
                let members = body["members"].as_array().cloned().unwrap_or_default();
                Json(json!({
                    "selectedSong": {
                        "title": "アイドル",
                        "artist": "YOASOBI",
                        "year": 2023,
                        "genre": "J-Pop"
                    },
                    "selectedSingers": [members.last().cloned().unwrap_or(Value::Null)]
                }))
            }),
        );
        let strategy = super::Strategy::Remote(RemoteStrategy::new(api::Client::new(serve(router).await)));

        let mut rng = StdRng::seed_from_u64(12);
        let roster = roster_with_ages(&[20, 21], &mut rng);
        let selection = strategy.select(&roster, &preferences(1)).await.unwrap();
        assert_eq!(selection.song.artist, "YOASOBI");
        assert_eq!(selection.singers, vec![roster.members()[1].clone()]);
    }

    #[tokio::test]
    async fn remote_strategy_fails_when_backend_is_down() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let strategy = RemoteStrategy::new(api::Client::new(format!("http://{addr}")));
        let mut rng = StdRng::seed_from_u64(13);
        let roster = roster_with_ages(&[20], &mut rng);
        assert!(matches!(
            strategy.select(&roster, &preferences(1)).await,
            Err(SelectionError::Client(_))
        ));
    }
}
