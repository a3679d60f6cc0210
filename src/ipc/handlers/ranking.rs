use crate::ipc::error::{gradebook_err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn order(state: &AppState) -> Vec<&str> {
    state
        .book
        .entries()
        .iter()
        .map(|e| e.student.name.as_str())
        .collect()
}

fn handle_sort_name(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.book.sort_name() {
        Ok(()) => ok(&req.id, json!({ "order": order(state) })),
        Err(e) => gradebook_err(&req.id, &req.method, &e),
    }
}

fn handle_sort_averages(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.book.sort_averages() {
        Ok(()) => ok(&req.id, json!({ "order": order(state) })),
        Err(e) => gradebook_err(&req.id, &req.method, &e),
    }
}

fn handle_top_five(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.book.top_five_gtid() {
        Ok(gtids) => ok(&req.id, json!({ "gtids": gtids })),
        Err(e) => gradebook_err(&req.id, &req.method, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "sort.name" => Some(handle_sort_name(state, req)),
        "sort.averages" => Some(handle_sort_averages(state, req)),
        "rank.topFive" => Some(handle_top_five(state, req)),
        _ => None,
    }
}
