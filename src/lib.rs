//! StreamFlow 客户端核心
//!
//! 不依赖 DOM 的全部客户端逻辑：配置、错误、HTTP 抽象、
//! 类型化 API、会话、视图状态机、表单、防抖搜索、播放快捷键与社交操作。
//! 浏览器相关的适配器位于 `frontend` crate。

pub mod api;
pub mod config;
pub mod debounce;
pub mod error;
pub mod forms;
pub mod playback;
pub mod profile;
pub mod request;
pub mod router;
pub mod search;
pub mod session;
pub mod social;

pub use api::StreamflowApi;
pub use config::{AppConfig, ConfigSource, ServiceEndpoints};
pub use error::{ClientError, ClientErrorKind, ClientResult};
pub use request::{HttpClient, HttpRequest, HttpResponse};
pub use router::{NavAction, Screen, Transition, View, ViewRouter};
pub use session::{KeyValueStore, Session, SessionRestore, SessionStore};

pub use streamflow_shared as shared;
