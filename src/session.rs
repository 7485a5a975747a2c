//! 会话持久化
//!
//! 令牌与用户信息分别保存在两个键下 (`auth_token` / `user_info`)，
//! 恢复时显式区分三种结果，损坏的数据会被清除而不是静默当作未登录。

use crate::error::{ClientError, ClientResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use streamflow_shared::{AuthResponse, STORAGE_TOKEN_KEY, STORAGE_USER_KEY, User};

// =========================================================
// 存储抽象 (Key-Value Store)
// =========================================================

/// 浏览器 localStorage 的抽象，测试中使用 `MemoryStore`
pub trait KeyValueStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn delete(&self, key: &str) -> ClientResult<()>;
}

/// 内存实现，克隆后共享同一份数据
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.data.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> ClientResult<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }
}

// =========================================================
// 会话模型
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self {
            token: resp.token,
            user: resp.user,
        }
    }
}

/// 启动时恢复会话的结果
#[derive(Debug, Clone, PartialEq)]
pub enum SessionRestore {
    Restored(Session),
    /// 两个键中至少有一个不存在
    Absent,
    /// 数据存在但无法解析，已被清除
    Corrupt(String),
}

impl SessionRestore {
    pub fn into_session(self) -> Option<Session> {
        match self {
            SessionRestore::Restored(session) => Some(session),
            _ => None,
        }
    }
}

pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn restore(&self) -> ClientResult<SessionRestore> {
        let token = self
            .store
            .get(STORAGE_TOKEN_KEY)
            .map_err(|e| e.in_op("session.restore"))?;
        let user = self
            .store
            .get(STORAGE_USER_KEY)
            .map_err(|e| e.in_op("session.restore"))?;

        let (Some(token), Some(raw_user)) = (
            token.filter(|t| !t.is_empty()),
            user.filter(|u| !u.is_empty()),
        ) else {
            return Ok(SessionRestore::Absent);
        };

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Ok(SessionRestore::Restored(Session { token, user })),
            Err(e) => {
                log::warn!("Discarding corrupt stored session: {}", e);
                self.clear()?;
                Ok(SessionRestore::Corrupt(e.to_string()))
            }
        }
    }

    pub fn persist(&self, session: &Session) -> ClientResult<()> {
        let user = serde_json::to_string(&session.user)
            .map_err(|e| ClientError::from(e).in_op("session.persist"))?;
        self.store
            .set(STORAGE_TOKEN_KEY, &session.token)
            .and_then(|_| self.store.set(STORAGE_USER_KEY, &user))
            .map_err(|e| e.in_op("session.persist"))
    }

    pub fn clear(&self) -> ClientResult<()> {
        self.store
            .delete(STORAGE_TOKEN_KEY)
            .and_then(|_| self.store.delete(STORAGE_USER_KEY))
            .map_err(|e| e.in_op("session.clear"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".into(),
            username: "ann".into(),
            email: "a@x.io".into(),
            created_at: None,
            last_login: None,
        }
    }

    #[test]
    fn persist_then_restore() {
        let store = MemoryStore::new();
        let sessions = SessionStore::new(store.clone());
        let session = Session {
            token: "t1".into(),
            user: user(),
        };

        sessions.persist(&session).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(
            sessions.restore().unwrap(),
            SessionRestore::Restored(session)
        );
    }

    #[test]
    fn missing_user_is_absent() {
        let store = MemoryStore::new();
        store.set(STORAGE_TOKEN_KEY, "t1").unwrap();
        let sessions = SessionStore::new(store);
        assert_eq!(sessions.restore().unwrap(), SessionRestore::Absent);
    }

    #[test]
    fn corrupt_user_is_reported_and_cleared() {
        let store = MemoryStore::new();
        store.set(STORAGE_TOKEN_KEY, "t1").unwrap();
        store.set(STORAGE_USER_KEY, "{not json").unwrap();
        let sessions = SessionStore::new(store.clone());

        let restored = sessions.restore().unwrap();
        assert!(matches!(restored, SessionRestore::Corrupt(_)));
        assert!(store.is_empty());
        assert_eq!(sessions.restore().unwrap(), SessionRestore::Absent);
    }

    #[test]
    fn clear_removes_both_keys() {
        let store = MemoryStore::new();
        let sessions = SessionStore::new(store.clone());
        sessions
            .persist(&Session {
                token: "t".into(),
                user: user(),
            })
            .unwrap();
        sessions.clear().unwrap();
        assert!(store.is_empty());
    }
}
