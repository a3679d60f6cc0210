use crate::ipc::error::{err, gradebook_err, ok};
use crate::ipc::helpers::grade_vector;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_setup_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    match serde_json::to_value(&state.config) {
        Ok(v) => ok(&req.id, json!({ "config": v })),
        Err(e) => err(&req.id, "internal", e.to_string(), None),
    }
}

fn handle_update_weights(state: &mut AppState, req: &Request) -> serde_json::Value {
    let weights = match grade_vector(req, "weights") {
        Ok(Some(w)) => w,
        Ok(None) => return err(&req.id, "bad_params", "missing weights", None),
        Err(resp) => return resp,
    };
    if let Err(e) = state.book.set_weights(weights) {
        return gradebook_err(&req.id, &req.method, &e);
    }
    state.config.weights = weights;
    tracing::info!(?weights, "weights updated");
    ok(
        &req.id,
        json!({
            "weights": weights,
            "courseAverage": state.book.course_average()
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "setup.get" => Some(handle_setup_get(state, req)),
        "setup.updateWeights" => Some(handle_update_weights(state, req)),
        _ => None,
    }
}
