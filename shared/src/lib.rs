use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub mod card;
pub mod date;
pub mod protocol;

pub use chrono;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中保存令牌的键
pub const STORAGE_TOKEN_KEY: &str = "auth_token";
/// LocalStorage 中保存用户信息 (JSON) 的键
pub const STORAGE_USER_KEY: &str = "user_info";

pub const UNKNOWN_AUTHOR: &str = "Unknown";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 认证服务返回的用户
///
/// 认证服务使用 `_id` 作为主键字段名，这里同时兼容 `id`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "lastLogin", default)]
    pub last_login: Option<DateTime<Utc>>,
}

/// 社交服务中保存的完整视频记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Video {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "channel", default)]
    pub author: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Video {
    pub fn has_engagement(&self) -> bool {
        self.likes >= 1 || !self.comments.is_empty()
    }
}

/// 登录 / 注册成功后的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// 单个视频的点赞数与评论列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SocialStats {
    #[serde(default)]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<String>,
}

/// 写操作的通用确认响应，如 `{"message": "Like added"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// 非 2xx 响应的错误体
///
/// 认证服务返回 `error`，其他服务有时返回 `message`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// 优先返回 `error`，其次 `message`，都为空时返回 None
    pub fn into_message(self) -> Option<String> {
        self.error
            .filter(|s| !s.is_empty())
            .or(self.message.filter(|s| !s.is_empty()))
    }
}

/// Go 服务会把空切片序列化为 `null`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
