use crate::web::FetchHttpClient;
use leptos::prelude::*;
use std::rc::Rc;
use streamflow::{AppConfig, StreamflowApi};

pub type Api = StreamflowApi<FetchHttpClient>;

/// 全局共享的运行时配置
///
/// API 客户端不是 `Send` 的，因此 Context 中只保存配置，
/// 每个页面按需构造自己的客户端。
#[derive(Clone, Debug)]
pub struct AppServices {
    pub config: AppConfig,
}

impl AppServices {
    pub fn api(&self) -> Rc<Api> {
        Rc::new(StreamflowApi::new(
            FetchHttpClient,
            self.config.endpoints.clone(),
        ))
    }
}

pub fn provide_services(config: AppConfig) {
    provide_context(AppServices { config });
}

pub fn use_services() -> AppServices {
    expect_context::<AppServices>()
}
