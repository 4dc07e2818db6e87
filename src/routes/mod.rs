use std::{sync::Arc, time::Duration};

use axum::{middleware::from_fn_with_state, Extension, Router};
use tower_cookies::CookieManagerLayer;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        admin::admin_handler, auth::auth_handler, feed::feed_handler, posts::posts_handler,
        user::users_handler,
    },
    middleware::session_context,
    AppState,
};

pub fn create_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .merge(feed_handler())
        .merge(auth_handler())
        .merge(posts_handler())
        .merge(users_handler())
        .merge(admin_handler())
        .fallback_service(ServeDir::new("public"))
        .layer(from_fn_with_state(app_state.clone(), session_context))
        .layer(CookieManagerLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}
