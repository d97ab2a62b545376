use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use textfx_core::Outputs;
use textfx_runner::{run_task, RunError};
use uuid::Uuid;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub task_id: String,
    pub inputs: Vec<String>,
    pub temperature: Option<f32>,
    pub run_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunResponse {
    pub run_id: String,
    pub task_id: String,
    pub status: String,
    pub results: Vec<String>,
    /// What a UI should show: the results, or one sentinel message.
    pub display: Vec<String>,
}

impl RunResponse {
    fn new(run_id: String, task_id: String, outputs: &Outputs) -> Self {
        Self {
            run_id,
            task_id,
            status: outputs.status().to_string(),
            results: outputs.results().to_vec(),
            display: outputs.display_lines(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn error(message: impl ToString) -> ErrorResponse {
    ErrorResponse {
        error: message.to_string(),
    }
}

pub async fn handler(state: web::Data<AppState>, req: web::Json<RunRequest>) -> impl Responder {
    let request = req.into_inner();

    let task = match state.tasks.get(&request.task_id) {
        Ok(task) => task,
        Err(e) => {
            log::warn!("Run request for unknown task {}", request.task_id);
            return HttpResponse::NotFound().json(error(e));
        }
    };

    let run_id = request
        .run_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let Some(guard) = state.begin_run(&run_id).await else {
        return HttpResponse::Conflict().json(error(format!("Run {} is already in progress", run_id)));
    };
    log::info!("[{}] Running task {}", run_id, task.id);

    let result = run_task(
        state.client.as_ref(),
        task,
        request.inputs.as_slice(),
        request.temperature,
        guard.token(),
    )
    .await;
    drop(guard);

    match result {
        Ok(outputs) => {
            log::info!("[{}] Task {} finished: {}", run_id, task.id, outputs.status());
            HttpResponse::Ok().json(RunResponse::new(run_id, task.id.clone(), &outputs))
        }
        Err(RunError::Cancelled) => {
            log::info!("[{}] Task {} cancelled", run_id, task.id);
            HttpResponse::Conflict().json(error(RunError::Cancelled))
        }
        Err(e) if e.is_invalid_input() => HttpResponse::BadRequest().json(error(e)),
        Err(e) => {
            log::error!("[{}] Task {} failed: {}", run_id, task.id, e);
            HttpResponse::InternalServerError().json(error(e))
        }
    }
}
