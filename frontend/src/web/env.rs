//! 运行时环境变量
//!
//! 部署时由 `env-config.js` 注入全局 `window.ENV_CONFIG` 对象。

use streamflow::ConfigSource;

const ENV_CONFIG_KEY: &str = "ENV_CONFIG";

/// 读取 `window.ENV_CONFIG` 的配置来源
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowEnv;

impl ConfigSource for WindowEnv {
    fn var(&self, key: &str) -> Option<String> {
        let window = web_sys::window()?;
        let env_config = js_sys::Reflect::get(&window, &ENV_CONFIG_KEY.into()).ok()?;

        if env_config.is_undefined() {
            log::warn!("ENV_CONFIG is undefined - using default configuration");
            return None;
        }

        let value = js_sys::Reflect::get(&env_config, &key.into()).ok()?;
        if value.is_undefined() {
            log::debug!("Environment variable '{}' is undefined", key);
            return None;
        }

        // 布尔值（如 DEBUG_MODE: true）也按字符串读取
        value
            .as_string()
            .or_else(|| value.as_bool().map(|b| b.to_string()))
    }
}
