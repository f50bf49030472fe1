use serde::{Deserialize, Serialize};

use crate::{Client, ClientResult};

/// A karaoke participant, as the backend sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// The member's session-unique identifier.
    pub id: String,
    /// The display name.
    pub nickname: String,
    /// One of `male`, `female` or `other`.
    pub gender: String,
    /// Age in years.
    pub age: u32,
}

/// The group's preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// The mood label.
    pub mood: String,
    /// The situation label.
    pub situation: String,
    /// How many people should sing, between 1 and 4.
    pub mic_count: u8,
}

/// A song in a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// The title.
    pub title: String,
    /// The performing artist.
    pub artist: String,
    /// The release year.
    pub year: i32,
    /// The genre.
    pub genre: String,
}

/// A request to the `recommend-songs` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    /// The full roster, in display order.
    pub members: Vec<Member>,
    /// The group's preferences.
    pub settings: Settings,
}
impl RecommendRequest {
    /// The endpoint path, relative to the base URL.
    pub const ENDPOINT: &str = "api/recommend-songs";
}

/// A response from the `recommend-songs` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    /// The song to sing.
    pub selected_song: Song,
    /// Who should sing it.
    pub selected_singers: Vec<Member>,
}

/// Recommendation endpoints.
impl Client {
    /// Ask the backend for a song and a set of singers.
    ///
    /// The response is returned as-is; checking that the singers actually
    /// belong to the roster is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-success status, or a
    /// malformed body.
    pub async fn recommend_songs(
        &self,
        request: &RecommendRequest,
    ) -> ClientResult<RecommendResponse> {
        self.post(RecommendRequest::ENDPOINT, request).await
    }
}
