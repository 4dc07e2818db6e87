use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_cookies::{Cookie, Cookies};

use crate::{
    session::{SessionUser, SESSION_COOKIE},
    AppState, Error, Result,
};

/// Everything a handler needs to know about who is asking. Built once per
/// request by `session_context`; handlers never reach into ambient state.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub token: String,
    pub user: Option<SessionUser>,
    pub is_admin: bool,
}

impl RequestContext {
    pub fn is_session(&self) -> bool {
        self.user.is_some()
    }

    pub fn require_user(&self) -> Result<&SessionUser> {
        self.user.as_ref().ok_or(Error::Unauthorized)
    }

    pub fn require_admin(&self) -> Result<&SessionUser> {
        if !self.is_admin {
            return Err(Error::Unauthorized);
        }
        self.require_user()
    }
}

pub async fn session_context(
    State(app_state): State<Arc<AppState>>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Response {
    let sessions = &app_state.sessions;

    let mut token = None;
    if let Some(held) = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string()) {
        if sessions.exists(&held).await {
            token = Some(held);
        } else {
            // A cookie that outlived its server-side session (say, across a
            // restart) is discarded and the request continues anonymously.
            cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
        }
    }
    let token = match token {
        Some(token) => token,
        None => {
            let token = sessions.start().await;
            let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
                .path("/")
                .http_only(true)
                .max_age(time::Duration::milliseconds(600_000))
                .build();
            cookies.add(cookie);
            token
        }
    };

    let user = sessions.user(&token).await;
    let is_admin = user
        .as_ref()
        .map(|u| u.snapshot.email == app_state.config.admin_email)
        .unwrap_or(false);

    req.extensions_mut().insert(RequestContext {
        token,
        user,
        is_admin,
    });

    next.run(req).await
}
