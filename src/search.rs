//! 浏览与搜索
//!
//! 每个列表/搜索请求都会领取一个递增序号，
//! 只有序号仍是最新的响应才会被应用，旧响应直接丢弃。

use crate::api::StreamflowApi;
use crate::debounce::{Debouncer, SEARCH_DEBOUNCE, TimerScheduler};
use crate::request::HttpClient;
use futures::future::LocalBoxFuture;
use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use streamflow_shared::card::VideoCard;
use streamflow_shared::protocol::SearchMode;

pub const EMPTY_RESULTS: &str = "No videos found.";

// =========================================================
// 请求序号
// =========================================================

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: Cell<u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> u64 {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        next
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}

// =========================================================
// 结果模型
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    /// 空查询，展示完整列表
    Recommended,
    Search,
}

impl ResultSource {
    pub fn heading(&self) -> &'static str {
        match self {
            ResultSource::Recommended => "Recommended for You",
            ResultSource::Search => "Search Results",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub source: ResultSource,
    pub videos: Vec<VideoCard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    ListFailed,
    SearchFailed,
}

impl SearchError {
    pub fn message(&self) -> &'static str {
        match self {
            SearchError::ListFailed => "Failed to load videos",
            SearchError::SearchFailed => "Search error",
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Current(T),
    /// 已有更新的请求发出
    Stale,
}

// =========================================================
// SearchService
// =========================================================

pub struct SearchService<C> {
    api: Rc<StreamflowApi<C>>,
    sequencer: Rc<RequestSequencer>,
    mode: SearchMode,
}

impl<C> Clone for SearchService<C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            sequencer: self.sequencer.clone(),
            mode: self.mode,
        }
    }
}

impl<C: HttpClient + 'static> SearchService<C> {
    pub fn new(api: Rc<StreamflowApi<C>>, mode: SearchMode) -> Self {
        Self {
            api,
            sequencer: Rc::new(RequestSequencer::new()),
            mode,
        }
    }

    /// 序号在调用时立即领取，而不是在 future 首次被 poll 时
    pub fn run(
        &self,
        query: &str,
    ) -> impl Future<Output = Fetched<Result<SearchResults, SearchError>>> + use<C> {
        let ticket = self.sequencer.issue();
        let sequencer = self.sequencer.clone();
        let api = self.api.clone();
        let mode = self.mode;
        let query = query.to_string();

        async move {
            let result = if query.trim().is_empty() {
                api.list_videos()
                    .await
                    .map(|videos| SearchResults {
                        source: ResultSource::Recommended,
                        videos,
                    })
                    .map_err(|e| {
                        log::warn!("{}", e.in_op("search.list"));
                        SearchError::ListFailed
                    })
            } else {
                api.search(&query, mode)
                    .await
                    .map(|videos| SearchResults {
                        source: ResultSource::Search,
                        videos,
                    })
                    .map_err(|e| {
                        log::warn!("{}", e.in_op_with("search.query", query.clone()));
                        SearchError::SearchFailed
                    })
            };

            if sequencer.is_latest(ticket) {
                Fetched::Current(result)
            } else {
                log::debug!("Discarding stale response #{}", ticket);
                Fetched::Stale
            }
        }
    }
}

// =========================================================
// SearchController: 防抖 + 调度
// =========================================================

/// 在当前线程上运行 future（浏览器中为 `spawn_local`）
pub trait LocalSpawner {
    fn spawn(&self, fut: LocalBoxFuture<'static, ()>);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchUpdate {
    Loading,
    Loaded(SearchResults),
    Failed(&'static str),
}

pub struct SearchController<S: TimerScheduler, C, P> {
    service: SearchService<C>,
    debouncer: Debouncer<S>,
    spawner: Rc<P>,
    sink: Rc<dyn Fn(SearchUpdate)>,
}

impl<S, C, P> SearchController<S, C, P>
where
    S: TimerScheduler,
    C: HttpClient + 'static,
    P: LocalSpawner + 'static,
{
    pub fn new(
        service: SearchService<C>,
        scheduler: S,
        spawner: P,
        sink: impl Fn(SearchUpdate) + 'static,
    ) -> Self {
        Self {
            service,
            debouncer: Debouncer::new(scheduler, SEARCH_DEBOUNCE),
            spawner: Rc::new(spawner),
            sink: Rc::new(sink),
        }
    }

    /// 挂载时加载完整列表，不经过防抖
    pub fn load_initial(&self) {
        dispatch(&self.service, self.spawner.as_ref(), &self.sink, "");
    }

    /// 每次按键调用，静默窗口结束后才真正发出请求
    pub fn on_input(&self, query: &str) {
        let service = self.service.clone();
        let spawner = self.spawner.clone();
        let sink = self.sink.clone();
        let query = query.to_string();
        self.debouncer
            .trigger(move || dispatch(&service, spawner.as_ref(), &sink, &query));
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

fn dispatch<C, P>(
    service: &SearchService<C>,
    spawner: &P,
    sink: &Rc<dyn Fn(SearchUpdate)>,
    query: &str,
) where
    C: HttpClient + 'static,
    P: LocalSpawner,
{
    sink(SearchUpdate::Loading);
    let fut = service.run(query);
    let sink = sink.clone();
    spawner.spawn(Box::pin(async move {
        match fut.await {
            Fetched::Current(Ok(results)) => sink(SearchUpdate::Loaded(results)),
            Fetched::Current(Err(e)) => sink(SearchUpdate::Failed(e.message())),
            Fetched::Stale => {}
        }
    }));
}

#[cfg(test)]
mod tests;
