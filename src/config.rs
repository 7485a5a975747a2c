use std::collections::HashMap;
use streamflow_shared::protocol::Service;

// =========================================================
// 动态运行时配置 (Runtime Configuration)
// =========================================================

/// 这些是默认值，如果运行环境中没有提供对应变量，则使用这些值
const DEFAULT_AUTH_URL: &str = "http://localhost:3000";
const DEFAULT_VIDEO_URL: &str = "http://localhost:3001";
const DEFAULT_SEARCH_URL: &str = "http://localhost:8080";
const DEFAULT_SOCIAL_URL: &str = "http://localhost:3000/api/social";
const DEFAULT_APP_NAME: &str = "StreamFlow";

pub const AUTH_URL_VAR: &str = "AUTH_SERVICE_URL";
pub const VIDEO_URL_VAR: &str = "VIDEO_SERVICE_URL";
pub const SEARCH_URL_VAR: &str = "SEARCH_SERVICE_URL";
pub const SOCIAL_URL_VAR: &str = "SOCIAL_SERVICE_URL";
pub const APP_NAME_VAR: &str = "APP_NAME";
pub const DEBUG_MODE_VAR: &str = "DEBUG_MODE";

/// 配置来源抽象
///
/// 浏览器中由 `window.ENV_CONFIG` 提供，测试中使用 HashMap。
pub trait ConfigSource {
    fn var(&self, name: &str) -> Option<String>;
}

impl ConfigSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

fn read_or(source: &impl ConfigSource, name: &str, default: &str) -> String {
    source
        .var(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// 各外部服务的基础地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    pub auth: String,
    pub video: String,
    pub search: String,
    pub social: String,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            auth: DEFAULT_AUTH_URL.to_string(),
            video: DEFAULT_VIDEO_URL.to_string(),
            search: DEFAULT_SEARCH_URL.to_string(),
            social: DEFAULT_SOCIAL_URL.to_string(),
        }
    }
}

impl ServiceEndpoints {
    pub fn from_source(source: &impl ConfigSource) -> Self {
        Self {
            auth: trim_base(read_or(source, AUTH_URL_VAR, DEFAULT_AUTH_URL)),
            video: trim_base(read_or(source, VIDEO_URL_VAR, DEFAULT_VIDEO_URL)),
            search: trim_base(read_or(source, SEARCH_URL_VAR, DEFAULT_SEARCH_URL)),
            social: trim_base(read_or(source, SOCIAL_URL_VAR, DEFAULT_SOCIAL_URL)),
        }
    }

    pub fn base(&self, service: Service) -> &str {
        match service {
            Service::Auth => &self.auth,
            Service::Video => &self.video,
            Service::Search => &self.search,
            Service::Social => &self.social,
        }
    }

    /// 拼接服务地址与路径
    pub fn url(&self, service: Service, path: &str) -> String {
        let base = self.base(service);
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

/// 应用级配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app_name: String,
    pub debug_mode: bool,
    pub endpoints: ServiceEndpoints,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            debug_mode: false,
            endpoints: ServiceEndpoints::default(),
        }
    }
}

impl AppConfig {
    pub fn from_source(source: &impl ConfigSource) -> Self {
        Self {
            app_name: read_or(source, APP_NAME_VAR, DEFAULT_APP_NAME),
            debug_mode: source
                .var(DEBUG_MODE_VAR)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(false),
            endpoints: ServiceEndpoints::from_source(source),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug_mode {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_source(&source(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn overrides_are_trimmed() {
        let config = AppConfig::from_source(&source(&[
            (VIDEO_URL_VAR, "https://videos.example/ "),
            (SEARCH_URL_VAR, "   "),
            (DEBUG_MODE_VAR, "true"),
        ]));
        assert_eq!(config.endpoints.video, "https://videos.example");
        assert_eq!(config.endpoints.search, DEFAULT_SEARCH_URL);
        assert!(config.debug_mode);
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn url_joins_with_single_slash() {
        let endpoints = ServiceEndpoints::default();
        assert_eq!(
            endpoints.url(Service::Video, "/videos"),
            "http://localhost:3001/videos"
        );
        assert_eq!(
            endpoints.url(Service::Social, "video/1"),
            "http://localhost:3000/api/social/video/1"
        );
    }
}
