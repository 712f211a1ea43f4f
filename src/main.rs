use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use taskgate::{db, routes, AppState, Config};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    log::error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("invalid configuration", e))?;

    let pool = db::connect(&config.database_url, config.db_max_connections)
        .await
        .map_err(|e| startup_error("failed to open database", e))?;
    db::migrate(&pool)
        .await
        .map_err(|e| startup_error("failed to prepare schema", e))?;

    let state = AppState::build(pool, &config)
        .await
        .map_err(|e| startup_error("failed to build application state", e))?;
    let mode = state.mode();
    let state = web::Data::new(state);

    log::info!(
        "Starting taskgate ({:?}) at {}",
        mode,
        config.server_url()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(|cfg| routes::config(cfg, mode))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
