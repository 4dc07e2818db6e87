use std::sync::Arc;

use axum::{
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Form, Router,
};
use tower_cookies::{Cookie, Cookies};
use validator::Validate;

use crate::{
    mail::mails::{send_registration_otp, send_reset_otp},
    middleware::RequestContext,
    models::{
        response::{render, MessagesPage, RegisterOtpPage, ResetOtpPage},
        users::{
            EmailVerifyForm, LoginForm, OtpCheckForm, PasswordResetForm, PendingRegistration,
            RegisterForm, RegisterOtpForm,
        },
    },
    services::auth::{generate_otp, LoginOutcome},
    session::SESSION_COOKIE,
    AppState, Result,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/register", get(register_page).post(register))
        .route("/registerOTP", post(register_otp))
        .route("/logout", get(logout))
        .route("/resetPass", get(reset_password_page))
        .route("/emailVerify", post(email_verify))
        .route("/otpCheck", post(otp_check))
        .route("/passwordReset", post(password_reset))
}

async fn login_page(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response> {
    // Already-authenticated visitors are bounced home.
    if ctx.is_session() {
        return Ok(Redirect::to("/").into_response());
    }

    let messages = app_state.sessions.take_flash(&ctx.token, "login").await;
    Ok(render("login", MessagesPage { messages }).into_response())
}

async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    if let Err(errors) = form.validate() {
        app_state
            .sessions
            .flash(&ctx.token, "login", errors.to_string())
            .await;
        return Ok(Redirect::to("/login"));
    }

    match app_state.auth_service.login(&form.email, &form.password).await? {
        LoginOutcome::Success(user) => {
            app_state.sessions.authenticate(&ctx.token, &user).await;
            if user.email == app_state.config.admin_email {
                app_state
                    .sessions
                    .flash(&ctx.token, "admin", "Admin Logged In")
                    .await;
                Ok(Redirect::to("/admin"))
            } else {
                app_state
                    .sessions
                    .flash(&ctx.token, "profile", "Logged in successfully!")
                    .await;
                Ok(Redirect::to("/authUser/dashboard"))
            }
        }
        LoginOutcome::WrongPassword => {
            app_state
                .sessions
                .flash(&ctx.token, "login", "Wrong Password! Try Again")
                .await;
            Ok(Redirect::to("/login"))
        }
        LoginOutcome::UnknownUser => {
            app_state
                .sessions
                .flash(&ctx.token, "login", "Sorry! User doesn't exist! Try SignUp")
                .await;
            Ok(Redirect::to("/login"))
        }
    }
}

async fn register_page(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response> {
    if ctx.is_session() {
        return Ok(Redirect::to("/").into_response());
    }

    let messages = app_state.sessions.take_flash(&ctx.token, "register").await;
    Ok(render("register", MessagesPage { messages }).into_response())
}

/// First registration step: check the email is free, hash the password,
/// mail an OTP and render the confirmation page. The profile fields ride
/// along in the page; nothing is persisted yet.
async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    if let Err(errors) = form.validate() {
        app_state
            .sessions
            .flash(&ctx.token, "register", errors.to_string())
            .await;
        return Ok(Redirect::to("/register").into_response());
    }

    if app_state.auth_service.email_taken(&form.email).await? {
        app_state
            .sessions
            .flash(&ctx.token, "login", "User already exists, Login please!")
            .await;
        return Ok(Redirect::to("/login").into_response());
    }

    let password_hash = app_state.auth_service.hash_password(&form.password)?;
    let pending = PendingRegistration {
        first_name: form.first_name,
        last_name: form.last_name,
        address: form.address,
        phone_number: form.phone_number,
        occupation: form.occupation,
        email: form.email,
        password: password_hash,
    };

    let otp = generate_otp();
    tokio::spawn(send_registration_otp(
        Arc::new(app_state.config.clone()),
        pending.email.clone(),
        otp,
    ));

    Ok(render("registerOTP", RegisterOtpPage { otp, usernew: pending }).into_response())
}

/// Second registration step: byte-for-byte OTP comparison. A match
/// persists the carried profile and logs the new account straight in; a
/// mismatch restarts the flow.
async fn register_otp(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<RegisterOtpForm>,
) -> Result<Redirect> {
    if form.sent_otp != form.entered_otp {
        app_state
            .sessions
            .flash(&ctx.token, "register", "Wrong OTP, Try again!")
            .await;
        return Ok(Redirect::to("/register"));
    }

    let user = app_state
        .auth_service
        .finalize_registration(form.into_pending())
        .await?;
    app_state.sessions.authenticate(&ctx.token, &user).await;
    app_state
        .sessions
        .flash(&ctx.token, "profile", "Your account is registered!")
        .await;

    Ok(Redirect::to("/authUser/dashboard"))
}

async fn logout(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    cookies: Cookies,
) -> Redirect {
    app_state.sessions.destroy(&ctx.token).await;
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    Redirect::to("/")
}

async fn reset_password_page() -> Result<impl IntoResponse> {
    Ok(render("OtpPass", serde_json::json!({})))
}

async fn email_verify(
    Extension(app_state): Extension<Arc<AppState>>,
    Form(form): Form<EmailVerifyForm>,
) -> Result<impl IntoResponse> {
    let otp = generate_otp();
    tokio::spawn(send_reset_otp(
        Arc::new(app_state.config.clone()),
        form.email,
        otp,
    ));

    Ok(render("otpSubmit", ResetOtpPage { otp }))
}

async fn otp_check(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<OtpCheckForm>,
) -> Result<Response> {
    if form.sent_otp == form.entered_otp {
        Ok(render("passwordReset", serde_json::json!({})).into_response())
    } else {
        app_state
            .sessions
            .flash(&ctx.token, "login", "Wrong OTP! Try again.")
            .await;
        Ok(Redirect::to("/login").into_response())
    }
}

async fn password_reset(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<PasswordResetForm>,
) -> Result<Redirect> {
    if form.password != form.password_confirm {
        app_state
            .sessions
            .flash(
                &ctx.token,
                "login",
                "Password and confirm Password did not match!",
            )
            .await;
        return Ok(Redirect::to("/login"));
    }

    let updated = app_state
        .auth_service
        .reset_password(&form.email, &form.password)
        .await?;
    if !updated {
        app_state
            .sessions
            .flash(&ctx.token, "login", "Some error occured!")
            .await;
    }

    Ok(Redirect::to("/login"))
}
