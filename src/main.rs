use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Duration;
use sqlx::PgPool;

use taskwarden::auth::{AuthMiddleware, TokenCodec};
use taskwarden::config::Config;
use taskwarden::repository::TaskRepository;
use taskwarden::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let repository = TaskRepository::new(pool);
    let codec = TokenCodec::new(
        config.jwt_secret.as_bytes(),
        Duration::hours(config.token_ttl_hours),
    );

    log::info!("Starting taskwarden server at {}", config.server_url());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        let cors = config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(repository.clone()))
            .app_data(web::Data::new(codec.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .service(routes::health::index)
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(codec.clone()))
                    .configure(routes::config),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
