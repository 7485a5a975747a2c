//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现核心 crate 的 `KeyValueStore`，
//! 会话以原始字符串保存，不做额外编码。

use streamflow::{ClientError, ClientResult, KeyValueStore};

/// 浏览器 LocalStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> ClientResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| ClientError::storage("无法获取 window 对象"))?
            .local_storage()
            .map_err(|e| ClientError::storage(format!("{:?}", e)))?
            .ok_or_else(|| ClientError::storage("LocalStorage 不可用"))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| ClientError::storage(format!("{:?}", e)).in_op_with("storage.get", key))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ClientError::storage(format!("{:?}", e)).in_op_with("storage.set", key))
    }

    fn delete(&self, key: &str) -> ClientResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| ClientError::storage(format!("{:?}", e)).in_op_with("storage.delete", key))
    }
}
