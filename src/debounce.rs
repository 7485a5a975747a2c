use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// 搜索输入的静默窗口
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(350);

/// 计时器抽象
///
/// 浏览器中基于 `setTimeout`，测试中使用可手动推进的虚拟时钟。
pub trait TimerScheduler {
    type Handle;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle;
    fn cancel(&self, handle: Self::Handle);
}

/// 防抖器：每次触发都会取消尚未执行的上一次
pub struct Debouncer<S: TimerScheduler> {
    scheduler: S,
    delay: Duration,
    pending: RefCell<Option<S::Handle>>,
    armed: Rc<Cell<bool>>,
}

impl<S: TimerScheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            pending: RefCell::new(None),
            armed: Rc::new(Cell::new(false)),
        }
    }

    pub fn trigger(&self, action: impl FnOnce() + 'static) {
        self.cancel();

        let armed = self.armed.clone();
        armed.set(true);
        let handle = self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                armed.set(false);
                action();
            }),
        );
        *self.pending.borrow_mut() = Some(handle);
    }

    pub fn cancel(&self) {
        // 已触发过的句柄也在这里释放，回调执行期间不能释放自身
        if let Some(handle) = self.pending.borrow_mut().take() {
            if self.armed.get() {
                self.scheduler.cancel(handle);
            }
        }
        self.armed.set(false);
    }

    pub fn is_pending(&self) -> bool {
        self.armed.get()
    }
}

impl<S: TimerScheduler> Drop for Debouncer<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    struct Entry {
        id: u64,
        due: Duration,
        callback: Box<dyn FnOnce()>,
    }

    #[derive(Default)]
    struct Clock {
        now: Duration,
        next_id: u64,
        entries: Vec<Entry>,
    }

    /// 虚拟时钟，`advance` 时按到期顺序执行回调
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        clock: Rc<RefCell<Clock>>,
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn pending_count(&self) -> usize {
            self.clock.borrow().entries.len()
        }

        pub fn advance(&self, by: Duration) {
            let target = self.clock.borrow().now + by;
            loop {
                let next = {
                    let mut clock = self.clock.borrow_mut();
                    let due = clock
                        .entries
                        .iter()
                        .enumerate()
                        .filter(|(_, e)| e.due <= target)
                        .min_by_key(|(_, e)| (e.due, e.id))
                        .map(|(i, _)| i);
                    due.map(|i| {
                        let entry = clock.entries.remove(i);
                        clock.now = entry.due;
                        entry
                    })
                };
                // 回调可能再次调度，因此不能持有借用
                match next {
                    Some(entry) => (entry.callback)(),
                    None => break,
                }
            }
            self.clock.borrow_mut().now = target;
        }
    }

    impl TimerScheduler for ManualScheduler {
        type Handle = u64;

        fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> u64 {
            let mut clock = self.clock.borrow_mut();
            let id = clock.next_id;
            clock.next_id += 1;
            let due = clock.now + delay;
            clock.entries.push(Entry { id, due, callback });
            id
        }

        fn cancel(&self, handle: u64) {
            self.clock.borrow_mut().entries.retain(|e| e.id != handle);
        }
    }
}
