//! 视频展示模型
//!
//! 视频服务的列表接口与搜索服务的检索结果字段名并不一致，
//! 这里把两种形状统一归并为 `VideoCard`，所有字段都保证可直接显示：
//! - 缺失的字符串字段为空串
//! - 缺失的计数为 0
//! - 缺失的作者为 "Unknown"

use crate::UNKNOWN_AUTHOR;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 列表与搜索共用的展示形状
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VideoCard {
    pub id: String,
    pub title: String,
    pub description: String,
    /// 可直接交给 `<video src>` 的地址
    pub src: String,
    pub thumbnail: String,
    pub author: String,
    pub views: u64,
    /// 只有视频列表携带，搜索结果为 0
    pub likes: u64,
    pub comments: Vec<String>,
    pub created_at: String,
}

impl VideoCard {
    /// 归并搜索服务的一条命中结果
    ///
    /// 主键按 `id` -> `_id` 顺序回退，播放地址固定为
    /// `<视频服务>/uploads/<id>`，浏览量与创建时间被清零。
    pub fn from_search_hit(hit: &Value, video_base: &str) -> Self {
        let id = text_field(hit, &["id", "_id"]).unwrap_or_default();
        Self {
            src: upload_url(video_base, &id),
            title: text_field(hit, &["title"]).unwrap_or_default(),
            description: text_field(hit, &["description"]).unwrap_or_default(),
            thumbnail: String::new(),
            author: text_field(hit, &["author"]).unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            views: 0,
            likes: 0,
            comments: Vec::new(),
            created_at: String::new(),
            id,
        }
    }

    /// 归并视频服务 `/videos` 列表中的一项
    ///
    /// 列表项的 `views` 可能是数字也可能是十进制字符串，
    /// 作者字段可能叫 `channel` 或 `author`。
    pub fn from_listing(item: &Value, video_base: &str) -> Self {
        let id = text_field(item, &["id", "_id"]).unwrap_or_default();
        let src = match text_field(item, &["src", "fileUrl", "path"]) {
            Some(raw) => absolute_url(video_base, &raw),
            None => upload_url(video_base, &id),
        };
        Self {
            src,
            title: text_field(item, &["title"]).unwrap_or_default(),
            description: text_field(item, &["description"]).unwrap_or_default(),
            thumbnail: text_field(item, &["thumbnail"]).unwrap_or_default(),
            author: text_field(item, &["channel", "author", "uploader"])
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            views: count_field(item, &["views"]),
            likes: count_field(item, &["likes"]),
            comments: text_list(item, "comments"),
            created_at: text_field(item, &["createdAt"]).unwrap_or_default(),
            id,
        }
    }

    pub fn is_authored_by(&self, username: &str) -> bool {
        !username.is_empty() && self.author == username
    }
}

/// 按顺序取第一个非空字段，数字与布尔值会被转为字符串
fn text_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn count_field(value: &Value, keys: &[&str]) -> u64 {
    keys.iter()
        .find_map(|key| match value.get(*key)? {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        })
        .unwrap_or(0)
}

/// 字符串数组，缺失或为 null 时为空，非字符串元素被跳过
fn text_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn upload_url(video_base: &str, id: &str) -> String {
    format!("{}/uploads/{}", video_base.trim_end_matches('/'), id)
}

fn absolute_url(video_base: &str, raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") || raw.starts_with("blob:") {
        raw.to_string()
    } else {
        format!(
            "{}/{}",
            video_base.trim_end_matches('/'),
            raw.trim_start_matches("./").trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "http://localhost:3001";

    #[test]
    fn search_hit_prefers_id_over_underscore_id() {
        let hit = json!({ "id": "a1", "_id": "b2", "title": "Cats", "author": "ann" });
        let card = VideoCard::from_search_hit(&hit, BASE);
        assert_eq!(card.id, "a1");
        assert_eq!(card.src, "http://localhost:3001/uploads/a1");
        assert_eq!(card.author, "ann");
        assert_eq!(card.views, 0);
        assert_eq!(card.created_at, "");
    }

    #[test]
    fn search_hit_falls_back_to_underscore_id_and_defaults() {
        let hit = json!({ "_id": "b2" });
        let card = VideoCard::from_search_hit(&hit, "http://localhost:3001/");
        assert_eq!(card.id, "b2");
        assert_eq!(card.src, "http://localhost:3001/uploads/b2");
        assert_eq!(card.title, "");
        assert_eq!(card.description, "");
        assert_eq!(card.author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn listing_reads_string_views_and_channel() {
        let item = json!({
            "id": "v9",
            "title": "Intro",
            "thumbnail": "http://cdn/t.png",
            "src": "uploads/v9.mp4",
            "channel": "bob",
            "views": "42"
        });
        let card = VideoCard::from_listing(&item, BASE);
        assert_eq!(card.views, 42);
        assert_eq!(card.author, "bob");
        assert_eq!(card.src, "http://localhost:3001/uploads/v9.mp4");
        assert!(card.is_authored_by("bob"));
        assert!(!card.is_authored_by(""));
    }

    #[test]
    fn listing_carries_engagement() {
        let item = json!({ "id": "v1", "likes": 3, "comments": ["nice", 7, "again"] });
        let card = VideoCard::from_listing(&item, BASE);
        assert_eq!(card.likes, 3);
        assert_eq!(card.comments, vec!["nice".to_string(), "again".to_string()]);

        let bare = VideoCard::from_listing(&json!({ "id": "v2", "comments": null }), BASE);
        assert_eq!(bare.likes, 0);
        assert!(bare.comments.is_empty());
    }

    #[test]
    fn listing_without_source_derives_upload_url() {
        let item = json!({ "_id": "x", "views": 7, "author": null });
        let card = VideoCard::from_listing(&item, BASE);
        assert_eq!(card.src, "http://localhost:3001/uploads/x");
        assert_eq!(card.views, 7);
        assert_eq!(card.author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn both_shapes_share_the_same_defaults() {
        let empty = json!({});
        let from_hit = VideoCard::from_search_hit(&empty, BASE);
        let from_listing = VideoCard::from_listing(&empty, BASE);
        assert_eq!(from_hit, from_listing);
    }

    #[test]
    fn absolute_sources_are_kept() {
        let item = json!({ "id": "1", "src": "https://media.example/1.mp4", "views": "oops" });
        let card = VideoCard::from_listing(&item, BASE);
        assert_eq!(card.src, "https://media.example/1.mp4");
        assert_eq!(card.views, 0);
    }
}
