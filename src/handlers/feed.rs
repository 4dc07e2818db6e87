use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::get,
    Extension, Router,
};

use crate::{
    handlers::resolve_user,
    middleware::RequestContext,
    models::{
        query::{FeedQuery, FeedScope, PageParams},
        response::{render, CategoryFeedPage, CategoryIndexPage, HomePage, SearchPage, StaticPage},
    },
    AppState, Result,
};

pub fn feed_handler() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/search", get(search))
        .route("/categories", get(categories_index))
        .route("/category/{name}", get(category_feed))
        .route("/category/{name}/searchCategories", get(category_search))
        .route("/about", get(about))
}

async fn home(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse> {
    let user = resolve_user(&app_state, &ctx).await?;
    let query = FeedQuery::feed(FeedScope::Global, &params);
    let page = app_state.posts_service.feed(&query).await?;
    let featured_post = app_state.posts_service.featured().await?;
    let categories = app_state.categories_service.list().await?;
    let messages = app_state.sessions.take_flash(&ctx.token, "home").await;

    Ok(render(
        "user/home",
        HomePage {
            posts: page.posts,
            total_pages: page.total_pages,
            current_page: page.current_page,
            categories,
            featured_post,
            is_session: ctx.is_session(),
            user,
            messages,
        },
    ))
}

async fn search(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse> {
    let user = resolve_user(&app_state, &ctx).await?;
    let query = FeedQuery::search(FeedScope::Global, &params);
    let page = app_state.posts_service.feed(&query).await?;

    Ok(render(
        "user/search",
        SearchPage {
            posts: page.posts,
            total_pages: page.total_pages,
            current_page: page.current_page,
            search_term: query.search.unwrap_or_default(),
            is_session: ctx.is_session(),
            user,
        },
    ))
}

async fn categories_index(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    let user = resolve_user(&app_state, &ctx).await?;
    let categories = app_state.categories_service.list().await?;

    Ok(render(
        "category/category",
        CategoryIndexPage {
            categories,
            is_session: ctx.is_session(),
            user,
        },
    ))
}

async fn category_feed(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(name): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse> {
    let user = resolve_user(&app_state, &ctx).await?;
    let query = FeedQuery::feed(FeedScope::Category(name.clone()), &params);
    let page = app_state.posts_service.feed(&query).await?;

    Ok(render(
        "category/categories",
        CategoryFeedPage {
            posts: page.posts,
            name,
            total_pages: page.total_pages,
            current_page: page.current_page,
            search_term: String::new(),
            user,
            is_session: ctx.is_session(),
        },
    ))
}

async fn category_search(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(name): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse> {
    let user = resolve_user(&app_state, &ctx).await?;
    let query = FeedQuery::search(FeedScope::Category(name.clone()), &params);
    let page = app_state.posts_service.feed(&query).await?;

    Ok(render(
        "category/categories",
        CategoryFeedPage {
            posts: page.posts,
            name,
            total_pages: page.total_pages,
            current_page: page.current_page,
            search_term: query.search.unwrap_or_default(),
            user,
            is_session: ctx.is_session(),
        },
    ))
}

async fn about(Extension(ctx): Extension<RequestContext>) -> Result<impl IntoResponse> {
    Ok(render(
        "about",
        StaticPage {
            is_session: ctx.is_session(),
        },
    ))
}
