use super::*;
use actix_web::FromRequest;
use actix_web::HttpMessage;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::body::MessageBody;
use actix_web::dev::Payload;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::web;
use spv_core::SESSION_COOKIE;
use spv_core::SIGN_IN_PATH;
use std::future::Ready;
use std::future::ready;

/// Optional resolver. Register once, app-wide, with
/// `middleware::from_fn(resolve)`.
///
/// Attaches a [`User`] to every request: `Auth` when the session cookie
/// carries a valid token, `Anon` otherwise. Never produces a response of its
/// own.
pub async fn resolve(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let user = identify(&req);
    req.extensions_mut().insert(user);
    next.call(req).await
}

fn identify(req: &ServiceRequest) -> User {
    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return User::Anon;
    };
    let Some(auth) = req.app_data::<web::Data<Authenticator>>() else {
        log::error!("authenticator not registered; treating request as anonymous");
        return User::Anon;
    };
    User::from(auth.resolve(cookie.value()).ok())
}

fn present(req: &ServiceRequest) -> bool {
    req.extensions()
        .get::<User>()
        .is_some_and(|user| user.identity().is_some())
}

/// Required gate for pages: redirects to the sign-in page when the
/// request carries no identity. Must run inside [`resolve`].
pub async fn signed_in(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    if present(&req) {
        return next.call(req).await.map(ServiceResponse::map_into_left_body);
    }
    let response = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, SIGN_IN_PATH))
        .finish();
    Ok(req.into_response(response).map_into_right_body())
}

/// Required gate for API routes: answers 401 when the request carries no
/// identity. Must run inside [`resolve`].
pub async fn authorized(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    if present(&req) {
        return next.call(req).await.map(ServiceResponse::map_into_left_body);
    }
    let response = HttpResponse::Unauthorized().body("authentication required");
    Ok(req.into_response(response).map_into_right_body())
}

/// Extractor for authenticated requests. Rejects with 401 when
/// [`resolve`] attached no identity.
pub struct Auth(pub Identity);

impl Auth {
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl FromRequest for Auth {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            current(req)
                .map(Auth)
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("authentication required")),
        )
    }
}

/// Optional authentication extractor - does not fail if unauthenticated.
pub struct MaybeAuth(pub Option<Identity>);

impl MaybeAuth {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

impl FromRequest for MaybeAuth {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(MaybeAuth(current(req))))
    }
}

/// The identity [`resolve`] attached to this request, if any.
pub fn current(req: &HttpRequest) -> Option<Identity> {
    req.extensions()
        .get::<User>()
        .and_then(User::identity)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use actix_web::App;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::middleware::from_fn;
    use actix_web::test;

    async fn whoami(user: MaybeAuth) -> HttpResponse {
        match user.identity() {
            Some(identity) => HttpResponse::Ok().body(identity.username().to_string()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    async fn secret(user: Auth) -> HttpResponse {
        HttpResponse::Ok().body(format!("hello {}", user.identity().username()))
    }

    macro_rules! app {
        ($auth:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($auth))
                    .wrap(from_fn(resolve))
                    .route("/whoami", web::get().to(whoami))
                    .service(
                        web::scope("/pages")
                            .wrap(from_fn(signed_in))
                            .route("/secret", web::get().to(secret)),
                    )
                    .service(
                        web::scope("/api")
                            .wrap(from_fn(authorized))
                            .route("/secret", web::get().to(secret)),
                    ),
            )
            .await
        };
    }

    fn cookie(auth: &Authenticator) -> Cookie<'static> {
        let token = auth.create_session(alice()).unwrap().token().unwrap();
        Cookie::new(SESSION_COOKIE, token)
    }

    #[actix_web::test]
    async fn anonymous_without_cookie() {
        let app = app!(authenticator());
        let req = test::TestRequest::get().uri("/whoami").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn resolves_valid_cookie() {
        let auth = authenticator();
        let cookie = cookie(&auth);
        let app = app!(auth);
        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(cookie)
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "alice");
    }

    #[actix_web::test]
    async fn garbage_cookie_is_anonymous() {
        let app = app!(authenticator());
        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new(SESSION_COOKIE, "garbage"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "anonymous");
    }

    #[actix_web::test]
    async fn foreign_key_cookie_is_anonymous() {
        let other = Authenticator::new(
            std::sync::Arc::new(Memory::default()),
            Crypto::new(b"someone-elses-key", TTL).unwrap().with_hasher(light()),
        );
        let app = app!(authenticator());
        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(cookie(&other))
            .to_request();
        assert_eq!(test::call_and_read_body(&app, req).await, "anonymous");
    }

    #[actix_web::test]
    async fn page_gate_redirects_to_sign_in() {
        let app = app!(authenticator());
        let req = test::TestRequest::get().uri("/pages/secret").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).unwrap(),
            SIGN_IN_PATH
        );
    }

    #[actix_web::test]
    async fn api_gate_answers_unauthorized() {
        let app = app!(authenticator());
        let req = test::TestRequest::get().uri("/api/secret").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn gates_pass_signed_in_requests() {
        let auth = authenticator();
        let cookie = cookie(&auth);
        let app = app!(auth);
        for uri in ["/pages/secret", "/api/secret"] {
            let req = test::TestRequest::get()
                .uri(uri)
                .cookie(cookie.clone())
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(test::read_body(res).await, "hello alice");
        }
    }

    #[actix_web::test]
    async fn missing_authenticator_is_anonymous() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(resolve))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new(SESSION_COOKIE, "anything"))
            .to_request();
        assert_eq!(test::call_and_read_body(&app, req).await, "anonymous");
    }
}
