//! 浏览器适配层
//!
//! 核心 crate 中各个 trait 的浏览器实现，直接封装 `web_sys`。

mod env;
mod http;
mod media;
pub mod router;
mod storage;
mod task;
mod timer;

pub use env::WindowEnv;
pub use http::FetchHttpClient;
pub use media::{VideoElement, probe_duration, read_upload_file};
pub use storage::BrowserStorage;
pub use task::BrowserSpawner;
pub use timer::BrowserScheduler;
