use std::sync::Arc;

use axum::{
    extract::Multipart,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Extension, Form, Router,
};

use crate::{
    mail::mails::send_contact_mail,
    middleware::RequestContext,
    models::{
        response::{render, ContactPage, DashboardPage, ProfilePage},
        users::{ContactForm, DeleteAccountForm, ProfileUpdate},
    },
    uploads::read_form,
    AppState, Error, Result,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/authUser/dashboard", get(dashboard))
        .route("/authUser/profile", get(profile_page))
        .route("/profile", post(update_profile))
        .route("/deleteAccount", post(delete_account))
        .route("/contact", get(contact_page).post(send_contact))
}

async fn contact_page(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    let messages = app_state.sessions.take_flash(&ctx.token, "contact").await;

    Ok(render(
        "contact",
        ContactPage {
            is_session: ctx.is_session(),
            messages,
        },
    ))
}

async fn dashboard(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    let session_user = ctx.require_user()?;
    let user = app_state.users_service.get_user(session_user.id).await?;
    let messages = app_state.sessions.take_flash(&ctx.token, "profile").await;

    Ok(render("authUser/dashboard", DashboardPage { user, messages }))
}

async fn profile_page(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<impl IntoResponse> {
    let session_user = ctx.require_user()?;
    let user = app_state.users_service.get_user(session_user.id).await?;

    Ok(render("authUser/profile", ProfilePage { user }))
}

async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    multipart: Multipart,
) -> Result<Redirect> {
    let session_user = ctx.require_user()?;
    let form = read_form(multipart, &app_state.config.uploads_dir).await?;

    let update = ProfileUpdate {
        first_name: form.value_or_default("inputFirstName"),
        last_name: form.value_or_default("inputLastName"),
        address: form.value_or_default("inputAddress"),
        phone_number: form.value_or_default("inputNumber"),
        occupation: form.value_or_default("inputOccupation"),
        image_profile: form.image.clone(),
    };

    if !app_state
        .users_service
        .update_profile(session_user.id, &update)
        .await?
    {
        return Err(Error::NotFound);
    }

    app_state
        .sessions
        .flash(&ctx.token, "profile", "Profile updated successfully!")
        .await;
    Ok(Redirect::to("/authUser/dashboard"))
}

/// Self-service account removal. Acts on the session identity; the posted
/// id must match it (admins remove accounts through their own route).
async fn delete_account(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<DeleteAccountForm>,
) -> Result<Redirect> {
    let session_user = ctx.require_user()?;
    if form.user_id != session_user.id && !ctx.is_admin {
        return Err(Error::Unauthorized);
    }

    app_state.users_service.delete_account(form.user_id).await?;
    Ok(Redirect::to("/logout"))
}

async fn send_contact(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<ContactForm>,
) -> Result<Redirect> {
    if !ctx.is_session() {
        app_state
            .sessions
            .flash(&ctx.token, "login", "Please login first!")
            .await;
        return Ok(Redirect::to("/contact"));
    }

    tokio::spawn(send_contact_mail(
        Arc::new(app_state.config.clone()),
        form.sender_name,
        form.sender_email,
        form.sender_subject,
        form.sender_text,
    ));

    app_state
        .sessions
        .flash(&ctx.token, "contact", "Mail Sent!")
        .await;
    Ok(Redirect::to("/contact"))
}
