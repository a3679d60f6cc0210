use crate::gradebook::GradebookError;
use serde_json::json;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

/// Error envelope for a rejected store operation.
pub fn gradebook_err(id: &str, method: &str, e: &GradebookError) -> serde_json::Value {
    tracing::warn!(method, code = e.code(), "{e}");
    let details = match e {
        GradebookError::Full { capacity } => Some(json!({ "capacity": capacity })),
        GradebookError::NameTooLong { len, max } => Some(json!({ "len": len, "max": max })),
        GradebookError::AssignmentOutOfRange { index, count } => {
            Some(json!({ "assignment": index, "count": count }))
        }
        GradebookError::EntryOutOfRange { index, size } => {
            Some(json!({ "index": index, "size": size }))
        }
        _ => None,
    };
    err(id, e.code(), e.to_string(), details)
}
