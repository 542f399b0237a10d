use super::*;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::cookie::Cookie;
use actix_web::cookie::SameSite;
use actix_web::cookie::time::OffsetDateTime;
use actix_web::http::header;
use actix_web::http::header::ContentType;
use actix_web::web;
use spv_core::HOME_PATH;
use spv_core::SESSION_COOKIE;
use spv_core::SIGN_IN_PATH;

fn redirect(location: &'static str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn page(username: &str, error: Option<&str>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(view::sign_in(username, error))
}

fn internal() -> HttpResponse {
    HttpResponse::InternalServerError().body("Internal server error")
}

/// Session cookie carrying `session`'s token, expiring with it.
pub fn cookie(session: &Session) -> Result<Cookie<'static>, AuthError> {
    let token = session.token().map_err(|e| {
        log::error!("failed to encode session: {}", e);
        AuthError::Internal
    })?;
    let expires = OffsetDateTime::from_unix_timestamp(session.expires_at().timestamp())
        .map_err(|e| {
            log::error!("session expiry out of cookie range: {}", e);
            AuthError::Internal
        })?;
    Ok(Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .secure(true)
        .http_only(true)
        .same_site(SameSite::Lax)
        .expires(expires)
        .finish())
}

/// Cookie that tells the browser to drop the session.
pub fn removal() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .secure(true)
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}

pub async fn sign_in(user: MaybeAuth) -> impl Responder {
    match user.identity() {
        Some(_) => redirect(HOME_PATH),
        None => page("", None),
    }
}

pub async fn submit_sign_in(
    auth: web::Data<Authenticator>,
    form: web::Form<SignInForm>,
) -> impl Responder {
    let identity = match auth.authenticate(&form.username, &form.password).await {
        Ok(identity) => identity,
        Err(AuthError::InvalidCredentials) => {
            return page(&form.username, Some("Invalid credentials"));
        }
        Err(AuthError::Internal) => return internal(),
    };
    match auth.create_session(identity).and_then(|session| cookie(&session)) {
        Ok(cookie) => HttpResponse::SeeOther()
            .insert_header((header::LOCATION, HOME_PATH))
            .cookie(cookie)
            .finish(),
        Err(_) => internal(),
    }
}

pub async fn sign_out() -> impl Responder {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, SIGN_IN_PATH))
        .cookie(removal())
        .finish()
}

pub async fn me(auth: Auth) -> impl Responder {
    HttpResponse::Ok().json(auth.identity())
}
