use crate::gradebook::NUM_ASSIGNMENTS;
use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "size": state.book.len(),
            "capacity": state.book.capacity(),
            "assignments": NUM_ASSIGNMENTS,
            "maxNameLength": state.book.max_name_length(),
            "weights": state.book.weights()
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        _ => None,
    }
}
