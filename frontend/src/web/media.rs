//! `<video>` 元素与本地文件
//!
//! - `VideoElement`: 实现核心 crate 的 `MediaControl`
//! - `read_upload_file`: 读取用户选择的文件
//! - `probe_duration`: 通过分离的 `<video preload=metadata>` 探测时长

use futures::channel::oneshot;
use streamflow::forms::UploadFile;
use streamflow::playback::MediaControl;
use streamflow::{ClientError, ClientResult};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlVideoElement, Url};

pub struct VideoElement(pub HtmlVideoElement);

impl MediaControl for VideoElement {
    fn paused(&self) -> bool {
        self.0.paused()
    }

    fn play(&self) {
        // play() 返回的 Promise 被自动播放策略拒绝时无需处理
        let _ = self.0.play();
    }

    fn pause(&self) {
        let _ = self.0.pause();
    }

    fn current_time(&self) -> f64 {
        self.0.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.0.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.0.duration()
    }

    fn volume(&self) -> f64 {
        self.0.volume()
    }

    fn set_volume(&self, volume: f64) {
        self.0.set_volume(volume);
    }

    fn muted(&self) -> bool {
        self.0.muted()
    }

    fn set_muted(&self, muted: bool) {
        self.0.set_muted(muted);
    }

    fn is_fullscreen(&self) -> bool {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.fullscreen_element())
            .is_some()
    }

    fn enter_fullscreen(&self) {
        if let Err(e) = self.0.request_fullscreen() {
            log::warn!("requestFullscreen failed: {:?}", e);
        }
    }

    fn exit_fullscreen(&self) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.exit_fullscreen();
        }
    }
}

/// 把 `File` 读入内存
pub async fn read_upload_file(file: &File) -> ClientResult<UploadFile> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ClientError::storage(format!("{:?}", e)).in_op("media.read_file"))?;
    let data = js_sys::Uint8Array::new(&buffer).to_vec();

    let content_type = file.type_();
    Ok(UploadFile {
        name: file.name(),
        content_type: if content_type.is_empty() {
            "application/octet-stream".to_string()
        } else {
            content_type
        },
        data,
    })
}

/// 探测视频时长（秒），无法解码时返回 None
///
/// 对象 URL 在读取完成后立即释放。
pub async fn probe_duration(file: &File) -> Option<f64> {
    let document = web_sys::window()?.document()?;
    let video: HtmlVideoElement = document.create_element("video").ok()?.dyn_into().ok()?;
    video.set_preload("metadata");

    let url = Url::create_object_url_with_blob(file).ok()?;

    let (tx, rx) = oneshot::channel::<bool>();
    let tx = std::rc::Rc::new(std::cell::RefCell::new(Some(tx)));

    let on_loaded = {
        let tx = tx.clone();
        Closure::<dyn FnMut()>::new(move || {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(true);
            }
        })
    };
    let on_error = Closure::<dyn FnMut()>::new(move || {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(false);
        }
    });

    video.set_onloadedmetadata(Some(on_loaded.as_ref().unchecked_ref()));
    video.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    video.set_src(&url);

    let loaded = rx.await.unwrap_or(false);

    video.set_onloadedmetadata(None);
    video.set_onerror(None);
    if let Err(e) = Url::revoke_object_url(&url) {
        log::debug!("revokeObjectURL failed: {:?}", e);
    }

    let duration = video.duration();
    (loaded && duration.is_finite()).then_some(duration)
}
