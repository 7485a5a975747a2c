use crate::api::StreamflowApi;
use crate::error::ClientResult;
use crate::request::HttpClient;
use crate::session::Session;
use streamflow_shared::Video;
use streamflow_shared::card::VideoCard;
use streamflow_shared::date::format_datetime;

pub const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/150";
pub const UNTITLED: &str = "Untitled Video";

/// 个人页中一张视频卡片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileVideo {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub likes: u64,
    pub views: u64,
    /// 第一条评论，没有评论时为 None
    pub first_comment: Option<String>,
}

fn or_default(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

impl ProfileVideo {
    pub fn from_card(card: &VideoCard) -> Self {
        Self {
            id: card.id.clone(),
            title: or_default(&card.title, UNTITLED),
            thumbnail: or_default(&card.thumbnail, PLACEHOLDER_THUMBNAIL),
            likes: card.likes,
            views: card.views,
            first_comment: card.comments.first().cloned(),
        }
    }

    pub fn from_social(video: &Video) -> Self {
        Self {
            id: video.id.clone(),
            title: or_default(&video.title, UNTITLED),
            thumbnail: or_default(&video.thumbnail, PLACEHOLDER_THUMBNAIL),
            likes: video.likes,
            views: video.views,
            first_comment: video.comments.first().cloned(),
        }
    }
}

/// 当前用户上传的视频
pub fn my_uploads(cards: &[VideoCard], username: &str) -> Vec<ProfileVideo> {
    cards
        .iter()
        .filter(|card| card.is_authored_by(username))
        .map(ProfileVideo::from_card)
        .collect()
}

/// 至少有一个赞或一条评论的视频
pub fn engaged_videos(videos: &[Video]) -> Vec<ProfileVideo> {
    videos
        .iter()
        .filter(|video| video.has_engagement())
        .map(ProfileVideo::from_social)
        .collect()
}

/// Dashboard 上展示的用户信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub greeting: String,
    pub id: String,
    pub email: String,
    pub member_since: String,
    pub last_login: String,
}

impl ProfileSummary {
    pub fn from_session(session: &Session) -> Self {
        let user = &session.user;
        Self {
            greeting: format!("Welcome, {}!", user.username),
            id: user.id.clone(),
            email: user.email.clone(),
            member_since: format_datetime(user.created_at.as_ref()),
            last_login: format_datetime(user.last_login.as_ref()),
        }
    }
}

/// 重新拉取用户资料；失败时调用方保留原来的会话
pub async fn refresh_session<C: HttpClient>(
    api: &StreamflowApi<C>,
    session: &Session,
) -> ClientResult<Session> {
    let user = api
        .profile(&session.token)
        .await
        .map_err(|e| e.in_op("profile.refresh"))?;
    Ok(Session {
        token: session.token.clone(),
        user,
    })
}

/// 个人页的两个列表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileLists {
    pub uploads: Vec<ProfileVideo>,
    pub engaged: Vec<ProfileVideo>,
}

/// 两个列表各自独立加载，任意一个失败都只留空
pub async fn load_profile_lists<C: HttpClient>(
    api: &StreamflowApi<C>,
    username: &str,
) -> ProfileLists {
    let (cards, social) = futures::join!(api.list_videos(), api.social_videos());

    let uploads = match cards {
        Ok(cards) => my_uploads(&cards, username),
        Err(e) => {
            log::warn!("{}", e.in_op("profile.uploads"));
            Vec::new()
        }
    };
    let engaged = match social {
        Ok(videos) => engaged_videos(&videos),
        Err(e) => {
            log::warn!("{}", e.in_op("profile.engaged"));
            Vec::new()
        }
    };

    ProfileLists { uploads, engaged }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceEndpoints;
    use crate::request::MockHttpClient;
    use serde_json::json;
    use std::rc::Rc;
    use streamflow_shared::User;

    fn session() -> Session {
        Session {
            token: "tok".into(),
            user: User {
                id: "u1".into(),
                username: "ann".into(),
                email: "a@x.io".into(),
                created_at: None,
                last_login: None,
            },
        }
    }

    #[test]
    fn uploads_are_filtered_by_author_with_defaults() {
        let cards = vec![
            VideoCard {
                id: "1".into(),
                author: "ann".into(),
                ..Default::default()
            },
            VideoCard {
                id: "2".into(),
                author: "bob".into(),
                title: "Bob's".into(),
                ..Default::default()
            },
        ];
        assert_eq!(
            my_uploads(&cards, "ann"),
            vec![ProfileVideo {
                id: "1".into(),
                title: UNTITLED.into(),
                thumbnail: PLACEHOLDER_THUMBNAIL.into(),
                likes: 0,
                views: 0,
                first_comment: None,
            }]
        );
    }

    #[test]
    fn engaged_requires_like_or_comment() {
        let videos = vec![
            Video {
                id: "a".into(),
                likes: 1,
                ..Default::default()
            },
            Video {
                id: "b".into(),
                ..Default::default()
            },
            Video {
                id: "c".into(),
                views: 12,
                comments: vec!["hi".into(), "again".into()],
                thumbnail: "http://cdn/c.png".into(),
                ..Default::default()
            },
        ];
        let engaged = engaged_videos(&videos);
        assert_eq!(
            engaged.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(),
            ["a", "c"]
        );
        assert_eq!(engaged[1].thumbnail, "http://cdn/c.png");
        assert_eq!(engaged[0].likes, 1);
        assert_eq!(engaged[0].first_comment, None);
        assert_eq!(engaged[1].views, 12);
        assert_eq!(engaged[1].first_comment.as_deref(), Some("hi"));
    }

    #[test]
    fn summary_shows_placeholders_for_missing_dates() {
        let summary = ProfileSummary::from_session(&session());
        assert_eq!(summary.greeting, "Welcome, ann!");
        assert_eq!(summary.member_since, "N/A");
        assert_eq!(summary.last_login, "N/A");
    }

    #[tokio::test]
    async fn refresh_failure_leaves_session_untouched() {
        let mock = Rc::new(MockHttpClient::new());
        let api = StreamflowApi::new(mock.clone(), ServiceEndpoints::default());
        let original = session();

        assert!(refresh_session(&api, &original).await.is_err());

        mock.mock_response(
            "http://localhost:3000/api/profile",
            200,
            json!({ "_id": "u1", "username": "ann", "email": "new@x.io" }),
        );
        let refreshed = refresh_session(&api, &original).await.unwrap();
        assert_eq!(refreshed.token, "tok");
        assert_eq!(refreshed.user.email, "new@x.io");
    }

    #[tokio::test]
    async fn rejected_token_ends_the_session() {
        use crate::router::{NavAction, ViewRouter};

        let mock = Rc::new(MockHttpClient::new());
        mock.mock_response(
            "http://localhost:3000/api/profile",
            401,
            json!({ "error": "Invalid token" }),
        );
        let api = StreamflowApi::new(mock, ServiceEndpoints::default());

        let err = refresh_session(&api, &session()).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Invalid token");

        let mut router = ViewRouter::new(Some(session()));
        router.dispatch(NavAction::SessionLost);
        assert!(router.session().is_none());
        assert_eq!(router.mounted(), None);
    }

    #[tokio::test]
    async fn profile_lists_load_independently() {
        let mock = Rc::new(MockHttpClient::new());
        mock.mock_response(
            "http://localhost:3001/videos",
            200,
            json!([{ "id": "1", "channel": "ann", "title": "Mine", "likes": 2, "views": "9", "comments": ["first!"] }]),
        );
        mock.mock_unreachable("http://localhost:3000/api/social/videos");
        let api = StreamflowApi::new(mock, ServiceEndpoints::default());

        let lists = load_profile_lists(&api, "ann").await;
        assert_eq!(lists.uploads.len(), 1);
        assert_eq!(lists.uploads[0].title, "Mine");
        assert_eq!(lists.uploads[0].likes, 2);
        assert_eq!(lists.uploads[0].views, 9);
        assert_eq!(lists.uploads[0].first_comment.as_deref(), Some("first!"));
        assert!(lists.engaged.is_empty());
    }
}
