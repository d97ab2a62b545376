use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use textfx_core::Task;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub inputs: Vec<String>,
    pub default_temperature: f32,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            description: task.description.clone(),
            inputs: task.input_labels.clone(),
            default_temperature: task.default_temperature,
        }
    }
}

pub async fn handler(state: web::Data<AppState>) -> impl Responder {
    let tasks: Vec<TaskSummary> = state.tasks.iter().map(TaskSummary::from).collect();
    HttpResponse::Ok().json(tasks)
}
