use crate::ipc::error::{gradebook_err, ok};
use crate::ipc::types::{AppState, Request};
use crate::report;
use serde_json::json;

fn handle_report_print(state: &mut AppState, req: &Request) -> serde_json::Value {
    match report::render_gradebook(&state.book) {
        Ok(text) => ok(&req.id, json!({ "text": text })),
        Err(e) => gradebook_err(&req.id, &req.method, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "report.print" => Some(handle_report_print(state, req)),
        _ => None,
    }
}
