use std::cell::Cell;

/// 方向键单次快进/快退的秒数
pub const SEEK_STEP: f64 = 10.0;
pub const VOLUME_STEP: f64 = 0.1;

/// 播放器快捷键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePlay,
    SeekForward,
    SeekBackward,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleFullscreen,
}

impl Shortcut {
    /// 按 `KeyboardEvent.key` 匹配
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " => Some(Shortcut::TogglePlay),
            "ArrowRight" => Some(Shortcut::SeekForward),
            "ArrowLeft" => Some(Shortcut::SeekBackward),
            "ArrowUp" => Some(Shortcut::VolumeUp),
            "ArrowDown" => Some(Shortcut::VolumeDown),
            "m" => Some(Shortcut::ToggleMute),
            "f" => Some(Shortcut::ToggleFullscreen),
            _ => None,
        }
    }
}

/// 焦点在文本输入框中时不响应快捷键
pub fn is_text_entry(tag_name: &str) -> bool {
    tag_name.eq_ignore_ascii_case("input") || tag_name.eq_ignore_ascii_case("textarea")
}

/// 原生媒体元素的控制面
pub trait MediaControl {
    fn paused(&self) -> bool;
    fn play(&self);
    fn pause(&self);
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    /// 未加载元数据时为 NaN
    fn duration(&self) -> f64;
    fn volume(&self) -> f64;
    fn set_volume(&self, volume: f64);
    fn muted(&self) -> bool;
    fn set_muted(&self, muted: bool);
    fn is_fullscreen(&self) -> bool;
    fn enter_fullscreen(&self);
    fn exit_fullscreen(&self);
}

pub fn apply_shortcut(media: &impl MediaControl, shortcut: Shortcut) {
    match shortcut {
        Shortcut::TogglePlay => {
            if media.paused() {
                media.play();
            } else {
                media.pause();
            }
        }
        Shortcut::SeekForward => seek_by(media, SEEK_STEP),
        Shortcut::SeekBackward => seek_by(media, -SEEK_STEP),
        Shortcut::VolumeUp => media.set_volume((media.volume() + VOLUME_STEP).clamp(0.0, 1.0)),
        Shortcut::VolumeDown => media.set_volume((media.volume() - VOLUME_STEP).clamp(0.0, 1.0)),
        Shortcut::ToggleMute => media.set_muted(!media.muted()),
        Shortcut::ToggleFullscreen => {
            if media.is_fullscreen() {
                media.exit_fullscreen();
            } else {
                media.enter_fullscreen();
            }
        }
    }
}

fn seek_by(media: &impl MediaControl, delta: f64) {
    let mut target = (media.current_time() + delta).max(0.0);
    let duration = media.duration();
    if duration.is_finite() {
        target = target.min(duration);
    }
    media.set_current_time(target);
}

/// 返回值表示是否需要调用 `preventDefault`
///
/// 快捷键绑定在 window 上，命中时浏览器自带的滚动、快进和音量调节都要屏蔽。
pub fn handle_key(media: &impl MediaControl, key: &str) -> bool {
    match Shortcut::from_key(key) {
        Some(shortcut) => {
            apply_shortcut(media, shortcut);
            true
        }
        None => false,
    }
}

/// 只在第一次 `play` 事件时记录一次播放
#[derive(Debug, Default)]
pub struct ViewTracker {
    recorded: Cell<bool>,
}

impl ViewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_play(&self) -> bool {
        !self.recorded.replace(true)
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// 内存中的媒体元素
    #[derive(Debug)]
    pub struct MockMedia {
        pub paused: Cell<bool>,
        pub time: Cell<f64>,
        pub duration: Cell<f64>,
        pub volume: Cell<f64>,
        pub muted: Cell<bool>,
        pub fullscreen: Cell<bool>,
    }

    impl Default for MockMedia {
        fn default() -> Self {
            Self {
                paused: Cell::new(true),
                time: Cell::new(0.0),
                duration: Cell::new(f64::NAN),
                volume: Cell::new(1.0),
                muted: Cell::new(false),
                fullscreen: Cell::new(false),
            }
        }
    }

    impl MediaControl for MockMedia {
        fn paused(&self) -> bool {
            self.paused.get()
        }
        fn play(&self) {
            self.paused.set(false);
        }
        fn pause(&self) {
            self.paused.set(true);
        }
        fn current_time(&self) -> f64 {
            self.time.get()
        }
        fn set_current_time(&self, seconds: f64) {
            self.time.set(seconds);
        }
        fn duration(&self) -> f64 {
            self.duration.get()
        }
        fn volume(&self) -> f64 {
            self.volume.get()
        }
        fn set_volume(&self, volume: f64) {
            self.volume.set(volume);
        }
        fn muted(&self) -> bool {
            self.muted.get()
        }
        fn set_muted(&self, muted: bool) {
            self.muted.set(muted);
        }
        fn is_fullscreen(&self) -> bool {
            self.fullscreen.get()
        }
        fn enter_fullscreen(&self) {
            self.fullscreen.set(true);
        }
        fn exit_fullscreen(&self) {
            self.fullscreen.set(false);
        }
    }
}
