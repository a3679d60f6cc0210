use crate::gradebook::{Grades, NUM_ASSIGNMENTS};
use crate::ipc::error::err;
use crate::ipc::types::Request;
use serde_json::json;

pub fn required_str<'a>(req: &'a Request, key: &str) -> Result<&'a str, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

pub fn required_i64(req: &Request, key: &str) -> Result<i64, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing/invalid {}", key), None))
}

pub fn required_index(req: &Request, key: &str) -> Result<usize, serde_json::Value> {
    match req.params.get(key).and_then(|v| v.as_u64()) {
        Some(v) => usize::try_from(v)
            .map_err(|_| err(&req.id, "bad_params", format!("{} is too large", key), None)),
        None => Err(err(
            &req.id,
            "bad_params",
            format!("missing/invalid {}", key),
            None,
        )),
    }
}

pub fn required_f64(req: &Request, key: &str) -> Result<f64, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing/invalid {}", key), None))
}

/// Reads a fixed-length numeric array, e.g. `grades` or `weights`.
pub fn grade_vector(req: &Request, key: &str) -> Result<Option<Grades>, serde_json::Value> {
    let Some(raw) = req.params.get(key) else {
        return Ok(None);
    };
    let bad = || {
        err(
            &req.id,
            "bad_params",
            format!("{} must be an array of {} numbers", key, NUM_ASSIGNMENTS),
            Some(json!({ "value": raw })),
        )
    };
    let items = raw.as_array().ok_or_else(bad)?;
    if items.len() != NUM_ASSIGNMENTS {
        return Err(bad());
    }
    let mut out = [0.0; NUM_ASSIGNMENTS];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item.as_f64().ok_or_else(bad)?;
    }
    Ok(Some(out))
}
