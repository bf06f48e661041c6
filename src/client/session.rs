use log::{info, warn};

use crate::api::{ApiRequest, DataResponse, UserInfo};
use crate::error::{Error, Result};

/// Credentials and cached profile of one account.
///
/// The profile is present exactly when the last login succeeded.
#[derive(Debug, Clone, Default)]
pub struct Session {
    cookie: String,
    info: Option<UserInfo>,
}

impl Session {
    pub fn new(cookie: impl Into<String>) -> Self {
        Self {
            cookie: cookie.into(),
            info: None,
        }
    }

    pub fn cookie(&self) -> &str {
        &self.cookie
    }

    pub fn info(&self) -> Option<&UserInfo> {
        self.info.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.info.is_some()
    }

    pub(crate) fn set_cookie(&mut self, cookie: &str) {
        self.cookie = cookie.to_owned();
    }

    /// Rejects requests that need an account before anything is sent.
    pub(crate) fn check(&self, req: &ApiRequest) -> Result<()> {
        if req.needs_login && !self.is_logged_in() {
            return Err(Error::NeedLogin {
                endpoint: req.url.path().to_owned(),
            });
        }
        Ok(())
    }

    /// Records the outcome of a login request. A rejected cookie is not an error.
    pub(crate) fn apply_login(&mut self, resp: DataResponse<UserInfo>) -> Option<UserInfo> {
        let success = resp.is_success();
        match resp.data {
            Some(user) if success => {
                info!("Logged in as {}", user.name.as_deref().unwrap_or(&user.user_id));
                self.info = Some(user.clone());
                Some(user)
            }
            _ => {
                warn!(
                    "Login failed (code: {:?}, msg: {})",
                    resp.code,
                    resp.msg.as_deref().unwrap_or("-")
                );
                self.info = None;
                None
            }
        }
    }
}
