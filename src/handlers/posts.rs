use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Form, Router,
};
use uuid::Uuid;

use crate::{
    handlers::resolve_user,
    middleware::RequestContext,
    models::{
        posts::{Comment, CommentForm, Post, PostDraft, PostIdForm, PostUpdate, PreviewTemplateForm},
        query::{FeedQuery, PageParams},
        response::{render, EditPostPage, OwnPostsPage, PostPage, TemplatePickerPage},
    },
    services::posts::PostsService,
    uploads::{read_form, SubmittedForm},
    AppState, Error, Result,
};

pub fn posts_handler() -> Router {
    Router::new()
        .route("/posts/{id}", get(post_detail))
        .route("/posts/edit/{id}", get(edit_post_page))
        .route("/posts/{id}/comment", post(add_comment))
        .route("/posts/{id}/report", post(report_post))
        .route("/authUser/posts", get(own_posts).post(create_post))
        .route("/searchPost", get(search_own_posts))
        .route("/previewTemplate", post(preview_template))
        .route("/upload", post(update_post))
        .route("/delete", post(delete_post))
}

/// Owner-or-admin gate for post mutations.
fn authorize_post(ctx: &RequestContext, post: &Post) -> Result<()> {
    let session_user = ctx.require_user()?;
    if post.account_id != session_user.id && !ctx.is_admin {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// The compose and edit forms submit either typed content or the
/// dictation transcript; an empty typed field falls back to the dictation.
fn content_or_dictation(form: &SubmittedForm) -> Option<String> {
    form.value("content")
        .filter(|c| !c.is_empty())
        .or_else(|| form.value("audioText"))
        .map(str::to_string)
}

async fn post_detail(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user = resolve_user(&app_state, &ctx).await?;

    // Every detail fetch counts a view, repeat visits included.
    let post = app_state
        .posts_service
        .view_post(post_id)
        .await?
        .ok_or(Error::NotFound)?;
    let post_user = app_state.users_service.find_user(post.account_id).await?;
    let related_posts = app_state.posts_service.related(&post).await?;

    Ok(render(
        "user/post",
        PostPage {
            title: post.title,
            content: post.content,
            id: post.id,
            name: post.account_name,
            image: post.image_post,
            comments: post.comments.0,
            category: post.category,
            is_session: ctx.is_session(),
            user,
            post_user,
            temp_id: post.template_id,
            views_count: post.views_count,
            related_posts,
        },
    ))
}

async fn edit_post_page(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let post = app_state
        .posts_service
        .get_post(post_id)
        .await?
        .ok_or(Error::NotFound)?;
    authorize_post(&ctx, &post)?;

    let categories = app_state.categories_service.list().await?;
    let all_templates = app_state.posts_service.templates().await?;

    Ok(render(
        "authUser/edit_post",
        EditPostPage {
            post,
            categories,
            all_templates,
        },
    ))
}

async fn own_posts(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse> {
    let session_user = ctx.require_user()?;
    let user = app_state.users_service.get_user(session_user.id).await?;
    let query = FeedQuery::own(user.id, &params);
    let page = app_state.posts_service.feed(&query).await?;
    let categories = app_state.categories_service.list().await?;
    let messages = app_state.sessions.take_flash(&ctx.token, "post").await;

    Ok(render(
        "authUser/posts",
        OwnPostsPage {
            posts: page.posts,
            total_pages: page.total_pages,
            current_page: page.current_page,
            categories,
            search_term: String::new(),
            user,
            messages,
        },
    ))
}

async fn search_own_posts(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse> {
    let session_user = ctx.require_user()?;
    let user = app_state.users_service.get_user(session_user.id).await?;
    let query = FeedQuery::own_search(user.id, &params);
    let page = app_state.posts_service.feed(&query).await?;
    let categories = app_state.categories_service.list().await?;
    let messages = app_state.sessions.take_flash(&ctx.token, "post").await;

    Ok(render(
        "authUser/posts",
        OwnPostsPage {
            posts: page.posts,
            total_pages: page.total_pages,
            current_page: page.current_page,
            categories,
            search_term: query.search.unwrap_or_default(),
            user,
            messages,
        },
    ))
}

/// Compose submission: stores the image, builds the in-transit draft and
/// renders the template picker. The draft is not persisted; abandoning the
/// picker loses it.
async fn create_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    multipart: Multipart,
) -> Result<Response> {
    let session_user = ctx.require_user()?;
    let form = read_form(multipart, &app_state.config.uploads_dir).await?;

    let Some(image) = form.image.clone() else {
        app_state
            .sessions
            .flash(&ctx.token, "post", "An image is required to publish a post.")
            .await;
        return Ok(Redirect::to("/authUser/posts").into_response());
    };

    let user = app_state.users_service.get_user(session_user.id).await?;
    let draft = PostsService::build_draft(
        &user,
        form.value_or_default("title"),
        form.value("content").map(str::to_string),
        form.value("audioText").map(str::to_string),
        image,
        form.values("selectedCategory"),
    );

    let newpost = serde_json::to_string(&draft).map_err(|_| Error::InternalServerError)?;
    let all_templates = app_state.posts_service.templates().await?;

    Ok(render(
        "authUser/template",
        TemplatePickerPage {
            newpost,
            all_templates,
        },
    )
    .into_response())
}

/// Picker confirmation: the carried draft plus the chosen template become
/// a persisted post.
async fn preview_template(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<PreviewTemplateForm>,
) -> Result<Redirect> {
    let session_user = ctx.require_user()?;

    let draft: PostDraft = serde_json::from_str(&form.data)
        .map_err(|_| Error::BadRequest("Malformed draft payload".to_string()))?;
    if draft.account_id != session_user.id && !ctx.is_admin {
        return Err(Error::Unauthorized);
    }

    let template_id = Uuid::parse_str(&form.temp_id).ok();
    app_state.posts_service.publish(draft, template_id).await?;

    app_state
        .sessions
        .flash(&ctx.token, "home", "Posted Successfully")
        .await;
    Ok(Redirect::to("/"))
}

async fn update_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    multipart: Multipart,
) -> Result<Redirect> {
    let form = read_form(multipart, &app_state.config.uploads_dir).await?;
    let post_id = form
        .require("postId")?
        .parse::<Uuid>()
        .map_err(|_| Error::BadRequest("Invalid post id".to_string()))?;

    let post = app_state
        .posts_service
        .get_post(post_id)
        .await?
        .ok_or(Error::NotFound)?;
    authorize_post(&ctx, &post)?;

    let update = PostUpdate {
        title: form.value_or_default("title"),
        content: content_or_dictation(&form).unwrap_or_default(),
        category: form.values("selectedCategory"),
        template_id: form.value("tempId").and_then(|t| t.parse().ok()),
        image_post: form.image.clone(),
    };

    if !app_state.posts_service.update(post_id, &update).await? {
        return Err(Error::NotFound);
    }

    app_state
        .sessions
        .flash(&ctx.token, "post", "Post Updated Successfully!")
        .await;
    Ok(Redirect::to("/authUser/posts"))
}

async fn delete_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<PostIdForm>,
) -> Result<Redirect> {
    let post = app_state
        .posts_service
        .get_post(form.post_id)
        .await?
        .ok_or(Error::NotFound)?;
    authorize_post(&ctx, &post)?;

    app_state.posts_service.delete(form.post_id).await?;
    app_state
        .sessions
        .flash(&ctx.token, "post", "Post Deleted Successfully!")
        .await;
    Ok(Redirect::to("/authUser/posts"))
}

/// Comments are open to anyone; the username is free text, not an account
/// reference.
async fn add_comment(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<Uuid>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect> {
    let comment = Comment {
        username: form.username,
        comment: form.comment,
        image_comment: form.url,
    };

    if !app_state.posts_service.comment(post_id, comment).await? {
        return Err(Error::NotFound);
    }

    Ok(Redirect::to(&format!("/posts/{post_id}")))
}

async fn report_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(post_id): Path<Uuid>,
) -> Result<Redirect> {
    if !app_state.posts_service.report(post_id).await? {
        return Err(Error::NotFound);
    }

    Ok(Redirect::to(&format!("/posts/{post_id}")))
}
