use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct StopResponse {
    pub success: bool,
    pub message: String,
}

pub async fn handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let run_id = path.into_inner();
    log::info!("[{}] Stop request received", run_id);

    if state.cancel_run(&run_id).await {
        HttpResponse::Ok().json(StopResponse {
            success: true,
            message: "Run stopped".to_string(),
        })
    } else {
        log::warn!("[{}] No active run found", run_id);
        HttpResponse::NotFound().json(StopResponse {
            success: false,
            message: "No active run found".to_string(),
        })
    }
}
