use crate::{middleware::RequestContext, models::users::User, AppState, Result};

pub mod admin;
pub mod auth;
pub mod feed;
pub mod posts;
pub mod user;

/// Dual-behavior pages show the visitor's profile when a session exists.
/// The record is resolved with a fresh store lookup rather than served
/// from the login-time session snapshot.
pub(crate) async fn resolve_user(
    app_state: &AppState,
    ctx: &RequestContext,
) -> Result<Option<User>> {
    match &ctx.user {
        Some(session_user) => app_state.users_service.find_user(session_user.id).await,
        None => Ok(None),
    }
}
