use crate::ipc::error::{gradebook_err, ok};
use crate::ipc::helpers::{required_f64, required_index, required_str};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_grades_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match required_str(req, "name") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let assignment = match required_index(req, "assignment") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let grade = match required_f64(req, "grade") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match state.book.update_grade(name, assignment, grade) {
        Ok(average) => ok(
            &req.id,
            json!({
                "average": average,
                "courseAverage": state.book.course_average()
            }),
        ),
        Err(e) => gradebook_err(&req.id, &req.method, &e),
    }
}

fn handle_grades_recalculate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let index = match required_index(req, "index") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.book.calculate_average(index) {
        Ok(average) => ok(&req.id, json!({ "average": average })),
        Err(e) => gradebook_err(&req.id, &req.method, &e),
    }
}

fn handle_course_recalculate(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.book.calculate_course_average() {
        Ok(_) => handle_course_averages(state, req),
        Err(e) => gradebook_err(&req.id, &req.method, &e),
    }
}

fn handle_course_averages(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "assignmentAverages": state.book.assignment_averages(),
            "courseAverage": state.book.course_average()
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.update" => Some(handle_grades_update(state, req)),
        "grades.recalculate" => Some(handle_grades_recalculate(state, req)),
        "course.recalculate" => Some(handle_course_recalculate(state, req)),
        "course.averages" => Some(handle_course_averages(state, req)),
        _ => None,
    }
}
