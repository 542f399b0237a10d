use super::*;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::http::header::ContentType;
use actix_web::middleware::Logger;
use actix_web::middleware::from_fn;
use actix_web::web;
use spv_auth::AuthRepository;
use spv_auth::Authenticator;
use std::sync::Arc;
use tokio_postgres::Client;

async fn health(client: web::Data<Arc<Client>>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

/// Landing page for signed-in users; wallets, tags, and transactions
/// mount beside it under the same gate.
async fn home(auth: spv_auth::Auth) -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(format!(
            "<!DOCTYPE html><html><body><p>Signed in as {}.</p><a href=\"/auth/sign-out\">Sign out</a></body></html>",
            spv_auth::view::escape(auth.identity().username())
        ))
}

fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

/// Connects to the database, makes sure the credential table exists, and
/// serves until the process is stopped.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let crypto = config.crypto()?;
    let client = spv_pg::db(config.database_url()?).await?;
    spv_pg::migrate::<spv_auth::Credentials>(&client).await?;
    let repository: Arc<dyn AuthRepository> = client.clone();
    let auth = web::Data::new(Authenticator::new(repository, crypto));
    let client = web::Data::new(client);
    let origins = config.api.cors_allowed_origins.clone();
    let bind = (config.api.listen_address.clone(), config.api.port);
    log::info!("starting server on {}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(spv_auth::resolve))
            .wrap(cors(&origins))
            .wrap(Logger::new("%r %s %Ts"))
            .app_data(auth.clone())
            .app_data(client.clone())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/auth")
                    .route("/sign-in", web::get().to(spv_auth::sign_in))
                    .route("/sign-in", web::post().to(spv_auth::submit_sign_in))
                    .route("/sign-out", web::get().to(spv_auth::sign_out))
                    .route("/me", web::get().to(spv_auth::me)),
            )
            .service(
                web::scope("")
                    .wrap(from_fn(spv_auth::signed_in))
                    .route("/", web::get().to(home)),
            )
    })
    .bind(bind)?
    .run()
    .await
    .map_err(anyhow::Error::from)
}
