//! 认证模块
//!
//! 会话的持久化与恢复。内存中的会话由路由状态机持有，
//! 这里只负责与 LocalStorage 同步。

use crate::web::BrowserStorage;
use crate::web::router::RouterService;
use streamflow::{NavAction, Session, SessionRestore, SessionStore};

fn store() -> SessionStore<BrowserStorage> {
    SessionStore::new(BrowserStorage)
}

/// 启动时恢复会话
pub fn restore_session() -> SessionRestore {
    match store().restore() {
        Ok(SessionRestore::Restored(session)) => {
            log::info!("Restored session for '{}'", session.user.username);
            SessionRestore::Restored(session)
        }
        Ok(SessionRestore::Corrupt(reason)) => {
            log::warn!("Stored session was corrupt and has been cleared: {}", reason);
            SessionRestore::Corrupt(reason)
        }
        Ok(SessionRestore::Absent) => SessionRestore::Absent,
        Err(e) => {
            log::error!("{}", e);
            SessionRestore::Absent
        }
    }
}

/// 登录/注册成功：持久化并进入 Dashboard
pub fn sign_in(router: &RouterService, session: Session) {
    if let Err(e) = store().persist(&session) {
        // 持久化失败只影响刷新后的恢复
        log::error!("{}", e);
    }
    log::info!("Signed in as '{}'", session.user.username);
    router.dispatch(NavAction::SignedIn(session));
}

/// 刷新资料后同步会话
pub fn refresh(router: &RouterService, session: Session) {
    if let Err(e) = store().persist(&session) {
        log::error!("{}", e);
    }
    router.update_session(session);
}

/// 注销并清除状态
pub fn logout(router: &RouterService) {
    if let Err(e) = store().clear() {
        log::error!("{}", e);
    }
    router.dispatch(NavAction::Logout);
}

/// 令牌被服务端拒绝：清除存储并让当前页面失去会话
pub fn expire(router: &RouterService) {
    if let Err(e) = store().clear() {
        log::error!("{}", e);
    }
    log::warn!("Session rejected by the server");
    router.dispatch(NavAction::SessionLost);
}
