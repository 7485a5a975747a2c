//! 播放页的社交操作（播放计数、点赞、评论）
//!
//! 所有失败都会写入一个可观察的错误通道，既不阻塞页面也不重试。

use crate::api::StreamflowApi;
use crate::error::{ClientError, ClientResult};
use crate::playback::ViewTracker;
use crate::request::HttpClient;
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialAction {
    LoadStats,
    RecordView,
    Like,
    Comment,
}

impl SocialAction {
    fn operation(&self) -> &'static str {
        match self {
            SocialAction::LoadStats => "social.stats",
            SocialAction::RecordView => "social.view",
            SocialAction::Like => "social.like",
            SocialAction::Comment => "social.comment",
        }
    }
}

impl fmt::Display for SocialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SocialAction::LoadStats => "load stats",
            SocialAction::RecordView => "record view",
            SocialAction::Like => "like",
            SocialAction::Comment => "comment",
        };
        f.write_str(name)
    }
}

/// 错误通道上的一条记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialFailure {
    pub action: SocialAction,
    pub video_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialState {
    pub likes: u64,
    pub comments: Vec<String>,
}

/// 同一个视频的社交状态，克隆后共享
pub struct SocialPanel<C> {
    api: Rc<StreamflowApi<C>>,
    video_id: String,
    state: Rc<RefCell<SocialState>>,
    /// 尚未被服务端确认的本地点赞数
    unconfirmed_likes: Rc<Cell<u64>>,
    views: Rc<ViewTracker>,
    failures: UnboundedSender<SocialFailure>,
}

impl<C> Clone for SocialPanel<C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            video_id: self.video_id.clone(),
            state: self.state.clone(),
            unconfirmed_likes: self.unconfirmed_likes.clone(),
            views: self.views.clone(),
            failures: self.failures.clone(),
        }
    }
}

impl<C: HttpClient + 'static> SocialPanel<C> {
    pub fn new(
        api: Rc<StreamflowApi<C>>,
        video_id: &str,
    ) -> (Self, UnboundedReceiver<SocialFailure>) {
        let (tx, rx) = unbounded();
        let panel = Self {
            api,
            video_id: video_id.to_string(),
            state: Rc::new(RefCell::new(SocialState::default())),
            unconfirmed_likes: Rc::new(Cell::new(0)),
            views: Rc::new(ViewTracker::new()),
            failures: tx,
        };
        (panel, rx)
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn state(&self) -> SocialState {
        self.state.borrow().clone()
    }

    fn report(&self, action: SocialAction, err: ClientError) -> ClientError {
        let err = err.in_op_with(action.operation(), self.video_id.clone());
        log::warn!("Social action '{}' failed: {}", action, err);
        // 接收端被丢弃说明页面已卸载
        let _ = self.failures.unbounded_send(SocialFailure {
            action,
            video_id: self.video_id.clone(),
            message: err.message().to_string(),
        });
        err
    }

    /// 尽力加载点赞数与评论，失败时保留默认值
    ///
    /// 响应到达前已点的赞会叠加到服务端计数上。
    pub fn load(&self) -> impl Future<Output = ()> + use<C> {
        let panel = self.clone();
        async move {
            match panel.api.social_stats(&panel.video_id).await {
                Ok(stats) => {
                    let mut state = panel.state.borrow_mut();
                    state.likes = stats.likes + panel.unconfirmed_likes.get();
                    state.comments = stats.comments;
                }
                Err(e) => {
                    panel.report(SocialAction::LoadStats, e);
                }
            }
        }
    }

    /// 第一次 `play` 事件时返回计数请求，之后返回 None
    pub fn on_play(&self) -> Option<impl Future<Output = ()> + use<C>> {
        if !self.views.on_play() {
            return None;
        }
        let panel = self.clone();
        Some(async move {
            if let Err(e) = panel.api.record_view(&panel.video_id).await {
                panel.report(SocialAction::RecordView, e);
            }
        })
    }

    /// 乐观更新：计数立即加一，失败不回滚
    pub fn like(&self) -> impl Future<Output = ClientResult<()>> + use<C> {
        self.state.borrow_mut().likes += 1;
        self.unconfirmed_likes.set(self.unconfirmed_likes.get() + 1);
        let panel = self.clone();
        async move {
            match panel.api.like(&panel.video_id).await {
                Ok(_) => {
                    panel
                        .unconfirmed_likes
                        .set(panel.unconfirmed_likes.get().saturating_sub(1));
                    Ok(())
                }
                // 失败的赞仍留在本地计数中
                Err(e) => Err(panel.report(SocialAction::Like, e)),
            }
        }
    }

    /// 空白评论被忽略并返回 `Ok(false)`；只有请求成功后才追加到列表
    pub fn comment(&self, text: &str) -> impl Future<Output = ClientResult<bool>> + use<C> {
        let panel = self.clone();
        let text = text.trim().to_string();
        async move {
            if text.is_empty() {
                return Ok(false);
            }
            match panel.api.comment(&panel.video_id, &text).await {
                Ok(_) => {
                    panel.state.borrow_mut().comments.push(text);
                    Ok(true)
                }
                Err(e) => Err(panel.report(SocialAction::Comment, e)),
            }
        }
    }
}
