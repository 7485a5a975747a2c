use crate::{Ack, AuthResponse, LoginRequest, RegisterRequest, SocialStats, User, Video};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// The external service an endpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Auth,
    Video,
    Search,
    Social,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The service that serves this endpoint.
    const SERVICE: Service;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the request itself is sent as the JSON body.
    const JSON_BODY: bool = false;
    /// Whether the bearer token must be attached.
    const AUTHENTICATED: bool = false;

    /// The URL path (relative to the service base), including query string.
    fn path(&self) -> String;
}

/// Multipart upload goes to the root of the video service.
pub const UPLOAD_PATH: &str = "/";

// =========================================================
// Auth
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const SERVICE: Service = Service::Auth;
    const METHOD: HttpMethod = HttpMethod::Post;
    const JSON_BODY: bool = true;

    fn path(&self) -> String {
        "/api/auth/login".to_string()
    }
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const SERVICE: Service = Service::Auth;
    const METHOD: HttpMethod = HttpMethod::Post;
    const JSON_BODY: bool = true;

    fn path(&self) -> String {
        "/api/auth/register".to_string()
    }
}

/// Current user profile (bearer token)
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileRequest;

impl ApiRequest for ProfileRequest {
    type Response = User;
    const SERVICE: Service = Service::Auth;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> String {
        "/api/profile".to_string()
    }
}

// =========================================================
// Video catalogue & search
// =========================================================

/// List every video known to the video service.
///
/// The listing shape is loosely typed (views may arrive as a string), so the
/// raw JSON is returned and reconciled by [`crate::card::VideoCard`].
#[derive(Debug, Serialize, Deserialize)]
pub struct ListVideosRequest;

impl ApiRequest for ListVideosRequest {
    type Response = Vec<serde_json::Value>;
    const SERVICE: Service = Service::Video;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/videos".to_string()
    }
}

/// Search strategies exposed by the search service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    Sentence,
    ExactWord,
    Fuzzy,
}

impl SearchMode {
    pub fn endpoint(&self) -> &'static str {
        match self {
            SearchMode::Sentence => "/sentence-search",
            SearchMode::ExactWord => "/exact-word-search",
            SearchMode::Fuzzy => "/fuzzy-search",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub mode: SearchMode,
}

impl ApiRequest for SearchRequest {
    type Response = Vec<serde_json::Value>;
    const SERVICE: Service = Service::Search;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!(
            "{}?q={}",
            self.mode.endpoint(),
            urlencoding::encode(&self.query)
        )
    }
}

// =========================================================
// Social
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct SocialStatsRequest {
    pub video_id: String,
}

impl ApiRequest for SocialStatsRequest {
    type Response = SocialStats;
    const SERVICE: Service = Service::Social;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/video/{}", urlencoding::encode(&self.video_id))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordViewRequest {
    pub video_id: String,
}

impl ApiRequest for RecordViewRequest {
    type Response = Ack;
    const SERVICE: Service = Service::Social;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/video/{}/view", urlencoding::encode(&self.video_id))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeRequest {
    pub video_id: String,
}

impl ApiRequest for LikeRequest {
    type Response = Ack;
    const SERVICE: Service = Service::Social;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/video/{}/like", urlencoding::encode(&self.video_id))
    }
}

/// Only `text` goes over the wire; the id lives in the path.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentRequest {
    #[serde(skip)]
    pub video_id: String,
    pub text: String,
}

impl ApiRequest for CommentRequest {
    type Response = Ack;
    const SERVICE: Service = Service::Social;
    const METHOD: HttpMethod = HttpMethod::Post;
    const JSON_BODY: bool = true;

    fn path(&self) -> String {
        format!("/video/{}/comment", urlencoding::encode(&self.video_id))
    }
}

/// Full social records, used by the profile page
#[derive(Debug, Serialize, Deserialize)]
pub struct SocialVideosRequest;

impl ApiRequest for SocialVideosRequest {
    type Response = Vec<Video>;
    const SERVICE: Service = Service::Social;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/videos".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_path_encodes_query() {
        let req = SearchRequest {
            query: "rust & wasm".into(),
            mode: SearchMode::Sentence,
        };
        assert_eq!(req.path(), "/sentence-search?q=rust%20%26%20wasm");

        let fuzzy = SearchRequest {
            query: "cat".into(),
            mode: SearchMode::Fuzzy,
        };
        assert_eq!(fuzzy.path(), "/fuzzy-search?q=cat");
    }

    #[test]
    fn comment_body_omits_video_id() {
        let req = CommentRequest {
            video_id: "v1".into(),
            text: "great".into(),
        };
        assert_eq!(req.path(), "/video/v1/comment");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({ "text": "great" })
        );
    }
}
