#[macro_use]
extern crate diesel;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Result;
use env_logger::Env;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod feed;
pub mod import;
pub mod models;
pub mod routes;
pub mod schema;
pub mod text;

pub async fn run() -> Result<()> {
    let config = config::Config::from_env()?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let pool = db::create_connection_pool(&config.database_url)?;
    let client = reqwest::Client::builder()
        .user_agent(concat!("rsstore/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let importer = import::Importer::new(pool.clone(), client);
    log::info!("Listening on {}", config.bind_address);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST"])
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(importer.clone()))
            .service(routes::index)
            .service(routes::articles::list_articles)
            .service(routes::articles::import_articles)
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await?;
    Ok(())
}
