use axum::{extract::State, Json};
use std::sync::Arc;

use crate::health::status::{StatusBoard, StatusSnapshot};

pub async fn get_status(State(board): State<Arc<StatusBoard>>) -> Json<StatusSnapshot> {
    Json(board.current().as_ref().clone())
}

pub async fn get_health(State(board): State<Arc<StatusBoard>>) -> Json<serde_json::Value> {
    let snapshot = board.current();
    Json(serde_json::json!({
        "state": snapshot.state,
        "down_hosts": snapshot.down_hosts.len(),
    }))
}
