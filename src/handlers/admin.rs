use std::sync::Arc;

use axum::{
    extract::{Multipart, Path},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Extension, Form, Router,
};
use uuid::Uuid;

use crate::{
    middleware::RequestContext,
    models::{
        categories::CategoryIdForm,
        posts::PostIdForm,
        response::{
            render, AdminCategoriesPage, AdminOverviewPage, AdminPostsPage, AdminUsersPage,
            UpdateCategoryPage,
        },
        users::DeleteAccountForm,
    },
    uploads::read_form,
    AppState, Error, Result,
};

pub fn admin_handler() -> Router {
    Router::new()
        .route("/admin", get(overview))
        .route("/admin/users", get(users))
        .route("/admin/posts", get(posts))
        .route("/admin/categories", get(categories))
        .route("/admin/categories/{id}", get(edit_category_page))
        .route("/admin/reportedPosts", get(reported_posts))
        .route("/admin/addCategory", post(add_category))
        .route("/updateCat/{id}/update", post(update_category))
        .route("/adminCatDelete", post(delete_category))
        .route("/adminDelete", post(delete_post))
        .route("/admindeleteAccount", post(delete_account))
        .route("/reportDelete", post(delete_reported_post))
        .route("/reportVerify", post(verify_reported_post))
}

async fn overview(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    ctx.require_admin()?;

    let users = app_state.users_service.all_users().await?;
    let posts = app_state.posts_service.all().await?;
    let categories = app_state.categories_service.list().await?;
    let messages = app_state.sessions.take_flash(&ctx.token, "admin").await;

    Ok(render(
        "admin/admin",
        AdminOverviewPage {
            users,
            posts,
            categories,
            messages,
        },
    ))
}

async fn users(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    ctx.require_admin()?;

    let users = app_state.users_service.all_users().await?;
    let messages = app_state.sessions.take_flash(&ctx.token, "adminuser").await;

    Ok(render("admin/adminUser", AdminUsersPage { users, messages }))
}

async fn posts(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    ctx.require_admin()?;

    let posts = app_state.posts_service.all().await?;
    let messages = app_state.sessions.take_flash(&ctx.token, "adminpost").await;

    Ok(render("admin/adminPost", AdminPostsPage { posts, messages }))
}

async fn categories(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    ctx.require_admin()?;

    let categories = app_state.categories_service.list().await?;
    let messages = app_state
        .sessions
        .take_flash(&ctx.token, "admincategory")
        .await;

    Ok(render(
        "admin/adminCategories",
        AdminCategoriesPage {
            categories,
            messages,
        },
    ))
}

async fn edit_category_page(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(category_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    ctx.require_admin()?;

    let category = app_state.categories_service.get(category_id).await?;
    Ok(render("admin/updateCategory", UpdateCategoryPage { category }))
}

async fn reported_posts(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    ctx.require_admin()?;

    let posts = app_state.posts_service.reported().await?;
    let messages = app_state
        .sessions
        .take_flash(&ctx.token, "adminreported")
        .await;

    Ok(render("admin/adminReport", AdminPostsPage { posts, messages }))
}

async fn add_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    multipart: Multipart,
) -> Result<Redirect> {
    ctx.require_admin()?;

    let form = read_form(multipart, &app_state.config.uploads_dir).await?;
    let Some(image) = form.image.clone() else {
        app_state
            .sessions
            .flash(&ctx.token, "admincategory", "An image is required for a category.")
            .await;
        return Ok(Redirect::to("/admin/categories"));
    };

    let name = form.require("name")?;
    app_state.categories_service.create(name, image).await?;

    app_state
        .sessions
        .flash(&ctx.token, "admincategory", "Category Added Successfully!")
        .await;
    Ok(Redirect::to("/admin/categories"))
}

async fn update_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(category_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Redirect> {
    ctx.require_admin()?;

    let form = read_form(multipart, &app_state.config.uploads_dir).await?;
    let name = form.require("catName")?;

    if !app_state
        .categories_service
        .update(category_id, &name, form.image.as_deref())
        .await?
    {
        return Err(Error::NotFound);
    }

    app_state
        .sessions
        .flash(&ctx.token, "admincategory", "Category Updated Successfully!")
        .await;
    Ok(Redirect::to("/admin/categories"))
}

async fn delete_category(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<CategoryIdForm>,
) -> Result<Redirect> {
    ctx.require_admin()?;

    app_state
        .categories_service
        .delete(form.category_id)
        .await?;
    app_state
        .sessions
        .flash(&ctx.token, "admincategory", "Category Deleted Successfully!")
        .await;
    Ok(Redirect::to("/admin/categories"))
}

async fn delete_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<PostIdForm>,
) -> Result<Redirect> {
    ctx.require_admin()?;

    if !app_state.posts_service.delete(form.post_id).await? {
        return Err(Error::NotFound);
    }

    app_state
        .sessions
        .flash(&ctx.token, "adminpost", "Post Deleted Successfully!")
        .await;
    Ok(Redirect::to("/admin/posts"))
}

async fn delete_account(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<DeleteAccountForm>,
) -> Result<Redirect> {
    ctx.require_admin()?;

    app_state.users_service.delete_account(form.user_id).await?;
    app_state
        .sessions
        .flash(&ctx.token, "adminuser", "User Deleted Successfully!")
        .await;
    Ok(Redirect::to("/admin/users"))
}

async fn delete_reported_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<PostIdForm>,
) -> Result<Redirect> {
    ctx.require_admin()?;

    if !app_state.posts_service.delete(form.post_id).await? {
        return Err(Error::NotFound);
    }

    app_state
        .sessions
        .flash(
            &ctx.token,
            "adminreported",
            "Successfully deleted the reported post!",
        )
        .await;
    Ok(Redirect::to("/admin/reportedPosts"))
}

/// Moderation "all clear": the report counter drops to zero, the post
/// itself is untouched.
async fn verify_reported_post(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<PostIdForm>,
) -> Result<Redirect> {
    ctx.require_admin()?;

    if !app_state.posts_service.clear_reports(form.post_id).await? {
        return Err(Error::NotFound);
    }

    app_state
        .sessions
        .flash(
            &ctx.token,
            "adminreported",
            "Reported post is verified to be fine!",
        )
        .await;
    Ok(Redirect::to("/admin/reportedPosts"))
}
