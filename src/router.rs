use crate::session::{Session, SessionRestore};
use std::fmt;
use streamflow_shared::card::VideoCard;

// =========================================================
// 视图状态机 (View Router)
// =========================================================

/// 当前挂载的页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Dashboard,
    Profile,
    Upload,
    Search,
    Playback,
}

impl View {
    pub fn requires_session(&self) -> bool {
        !matches!(self, View::Login | View::Register)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Login => "login",
            View::Register => "register",
            View::Dashboard => "dashboard",
            View::Profile => "profile",
            View::Upload => "upload",
            View::Search => "search",
            View::Playback => "playback",
        };
        f.write_str(name)
    }
}

/// 用户触发的导航动作
#[derive(Debug, Clone, PartialEq)]
pub enum NavAction {
    SwitchToRegister,
    SwitchToLogin,
    SignedIn(Session),
    ViewProfile,
    GoToUpload,
    WatchVideos,
    SelectVideo(VideoCard),
    Back,
    GoDashboard,
    Logout,
    /// 服务端拒绝了当前令牌，只清除内存中的会话并停留在原页面
    SessionLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    NoSession,
    NoVideoSelected,
    IllegalTransition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: View, to: View },
    Stayed(View),
    Blocked { from: View, reason: BlockReason },
}

/// 可以被挂载的页面及其所需数据
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Login,
    Register,
    Dashboard(Session),
    Profile(Session),
    Upload(Session),
    Search(Session),
    Playback { session: Session, video: VideoCard },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewRouter {
    view: View,
    session: Option<Session>,
    selected: Option<VideoCard>,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ViewRouter {
    /// 有会话时从 Dashboard 开始，否则从 Login 开始
    pub fn new(session: Option<Session>) -> Self {
        let view = if session.is_some() {
            View::Dashboard
        } else {
            View::Login
        };
        Self {
            view,
            session,
            selected: None,
        }
    }

    pub fn from_restore(restore: SessionRestore) -> Self {
        Self::new(restore.into_session())
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn selected(&self) -> Option<&VideoCard> {
        self.selected.as_ref()
    }

    /// 刷新资料后替换会话中的用户信息
    pub fn update_session(&mut self, session: Session) {
        if self.session.is_some() {
            self.session = Some(session);
        }
    }

    pub fn dispatch(&mut self, action: NavAction) -> Transition {
        let from = self.view;

        match action {
            NavAction::Logout => {
                self.session = None;
                self.selected = None;
                return self.move_to(View::Login);
            }
            NavAction::SessionLost => {
                self.session = None;
                return Transition::Stayed(from);
            }
            _ => {}
        }

        let target = match (from, &action) {
            (View::Login, NavAction::SwitchToRegister) => View::Register,
            (View::Register, NavAction::SwitchToLogin) => View::Login,
            (View::Login | View::Register, NavAction::SignedIn(_)) => View::Dashboard,
            (View::Dashboard, NavAction::ViewProfile) => View::Profile,
            (View::Dashboard, NavAction::GoToUpload) => View::Upload,
            (View::Dashboard, NavAction::WatchVideos) => View::Search,
            (View::Profile | View::Upload | View::Search, NavAction::Back) => View::Dashboard,
            (View::Search, NavAction::SelectVideo(_)) => View::Playback,
            (View::Playback, NavAction::Back) => View::Search,
            (View::Playback, NavAction::GoDashboard) => View::Dashboard,
            _ => {
                return Transition::Blocked {
                    from,
                    reason: BlockReason::IllegalTransition,
                };
            }
        };

        match action {
            NavAction::SignedIn(session) => {
                self.session = Some(session);
            }
            NavAction::SelectVideo(card) => {
                if self.session.is_none() {
                    return Transition::Blocked {
                        from,
                        reason: BlockReason::NoSession,
                    };
                }
                if card.id.is_empty() {
                    return Transition::Blocked {
                        from,
                        reason: BlockReason::NoVideoSelected,
                    };
                }
                self.selected = Some(card);
            }
            _ => {}
        }

        if target.requires_session() && self.session.is_none() {
            return Transition::Blocked {
                from,
                reason: BlockReason::NoSession,
            };
        }

        if from == View::Playback {
            self.selected = None;
        }
        self.move_to(target)
    }

    fn move_to(&mut self, to: View) -> Transition {
        let from = self.view;
        self.view = to;
        Transition::Moved { from, to }
    }

    /// 当前应挂载的页面
    ///
    /// 需要会话却没有会话（或播放页没有选中视频）时返回 None，
    /// 页面渲染为空。
    pub fn mounted(&self) -> Option<Screen> {
        match self.view {
            View::Login => Some(Screen::Login),
            View::Register => Some(Screen::Register),
            View::Dashboard => self.session.clone().map(Screen::Dashboard),
            View::Profile => self.session.clone().map(Screen::Profile),
            View::Upload => self.session.clone().map(Screen::Upload),
            View::Search => self.session.clone().map(Screen::Search),
            View::Playback => match (&self.session, &self.selected) {
                (Some(session), Some(video)) => Some(Screen::Playback {
                    session: session.clone(),
                    video: video.clone(),
                }),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamflow_shared::User;

    fn session() -> Session {
        Session {
            token: "t".into(),
            user: User {
                id: "u1".into(),
                username: "ann".into(),
                email: String::new(),
                created_at: None,
                last_login: None,
            },
        }
    }

    fn card(id: &str) -> VideoCard {
        VideoCard {
            id: id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn starts_at_login_without_session() {
        let router = ViewRouter::from_restore(SessionRestore::Corrupt("bad".into()));
        assert_eq!(router.view(), View::Login);
        assert_eq!(router.mounted(), Some(Screen::Login));
    }

    #[test]
    fn restored_session_starts_at_dashboard() {
        let router = ViewRouter::from_restore(SessionRestore::Restored(session()));
        assert_eq!(router.view(), View::Dashboard);
        assert_eq!(router.mounted(), Some(Screen::Dashboard(session())));
    }

    #[test]
    fn sign_in_and_browse_to_playback() {
        let mut router = ViewRouter::default();
        assert_eq!(
            router.dispatch(NavAction::SwitchToRegister),
            Transition::Moved {
                from: View::Login,
                to: View::Register
            }
        );
        router.dispatch(NavAction::SignedIn(session()));
        assert_eq!(router.view(), View::Dashboard);

        router.dispatch(NavAction::WatchVideos);
        router.dispatch(NavAction::SelectVideo(card("v1")));
        assert_eq!(router.view(), View::Playback);
        assert!(matches!(
            router.mounted(),
            Some(Screen::Playback { ref video, .. }) if video.id == "v1"
        ));

        router.dispatch(NavAction::Back);
        assert_eq!(router.view(), View::Search);
        assert!(router.selected().is_none());
    }

    #[test]
    fn upload_after_session_lost_is_blocked() {
        let mut router = ViewRouter::new(Some(session()));
        assert_eq!(
            router.dispatch(NavAction::SessionLost),
            Transition::Stayed(View::Dashboard)
        );
        assert_eq!(
            router.dispatch(NavAction::GoToUpload),
            Transition::Blocked {
                from: View::Dashboard,
                reason: BlockReason::NoSession
            }
        );
        assert_eq!(router.view(), View::Dashboard);
        assert_eq!(router.mounted(), None);
    }

    #[test]
    fn undeclared_transitions_are_illegal() {
        let mut router = ViewRouter::default();
        assert_eq!(
            router.dispatch(NavAction::GoToUpload),
            Transition::Blocked {
                from: View::Login,
                reason: BlockReason::IllegalTransition
            }
        );

        let mut router = ViewRouter::new(Some(session()));
        assert!(matches!(
            router.dispatch(NavAction::SelectVideo(card("v1"))),
            Transition::Blocked {
                reason: BlockReason::IllegalTransition,
                ..
            }
        ));
    }

    #[test]
    fn only_search_opens_playback() {
        let mut router = ViewRouter::new(Some(session()));
        router.dispatch(NavAction::GoToUpload);
        assert_eq!(
            router.dispatch(NavAction::SelectVideo(card("v1"))),
            Transition::Blocked {
                from: View::Upload,
                reason: BlockReason::IllegalTransition
            }
        );

        router.dispatch(NavAction::Back);
        router.dispatch(NavAction::ViewProfile);
        assert_eq!(
            router.dispatch(NavAction::SelectVideo(card("v1"))),
            Transition::Blocked {
                from: View::Profile,
                reason: BlockReason::IllegalTransition
            }
        );
        assert!(router.selected().is_none());
    }

    #[test]
    fn selecting_a_card_without_id_is_blocked() {
        let mut router = ViewRouter::new(Some(session()));
        router.dispatch(NavAction::WatchVideos);
        assert_eq!(
            router.dispatch(NavAction::SelectVideo(card(""))),
            Transition::Blocked {
                from: View::Search,
                reason: BlockReason::NoVideoSelected
            }
        );
    }

    #[test]
    fn logout_always_returns_to_login() {
        let mut router = ViewRouter::new(Some(session()));
        router.dispatch(NavAction::WatchVideos);
        router.dispatch(NavAction::SelectVideo(card("v1")));

        assert_eq!(
            router.dispatch(NavAction::Logout),
            Transition::Moved {
                from: View::Playback,
                to: View::Login
            }
        );
        assert!(router.session().is_none());
        assert!(router.selected().is_none());
    }
}
