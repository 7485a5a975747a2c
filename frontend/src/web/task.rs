use futures::future::LocalBoxFuture;
use streamflow::search::LocalSpawner;

/// 在浏览器事件循环上运行 future
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

impl LocalSpawner for BrowserSpawner {
    fn spawn(&self, fut: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(fut);
    }
}
