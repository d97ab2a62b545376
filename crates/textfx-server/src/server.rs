use std::path::Path;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use textfx_core::Config;

use crate::handlers;
use crate::state::AppState;

/// Mounts every route under `/api/v1`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(handlers::health::handler))
            .route("/tasks", web::get().to(handlers::tasks::handler))
            .route("/run", web::post().to(handlers::run::handler))
            .route("/stop/{run_id}", web::post().to(handlers::stop::handler)),
    );
}

pub async fn run_server_with_config(
    port: u16,
    config: &Config,
    tasks_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let state = web::Data::new(AppState::new_with_config(config, tasks_dir)?);
    run_server(port, state).await
}

pub async fn run_server(port: u16, state: web::Data<AppState>) -> anyhow::Result<()> {
    log::info!(
        "Serving {} tasks on http://0.0.0.0:{}/api/v1",
        state.tasks.len(),
        port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .configure(configure)
    })
    .bind(format!("0.0.0.0:{}", port))?
    .run()
    .await?;

    Ok(())
}
