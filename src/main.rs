use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use env_logger::Env;

use filestore_dash::config::Config;
use filestore_dash::state::AppState;
use filestore_dash::{cors, routes};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let bind_addr = config.bind_addr.clone();
    let state = web::Data::new(AppState::new(config).context("Unable to build the HTTP client")?);

    log::info!("Starting server at http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(&state.config))
            .wrap(Logger::default())
            .configure(routes)
    })
    .bind(bind_addr.as_str())
    .with_context(|| format!("Unable to bind {}", bind_addr))?
    .run()
    .await?;

    Ok(())
}
