use crate::ipc::error::{err, gradebook_err, ok};
use crate::ipc::helpers::{grade_vector, required_i64, required_str};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_students_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match required_str(req, "name") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let major = match required_str(req, "major") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let gtid = match required_i64(req, "gtid") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let year = match required_i64(req, "year") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    // Grades are validated before anything is inserted.
    let grades = match grade_vector(req, "grades") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let added = match grades {
        Some(g) => state
            .book
            .add_student_with_grades(name, gtid, year, major, &g),
        None => state.book.add_student(name, gtid, year, major),
    };
    match added {
        Ok(index) => ok(
            &req.id,
            json!({
                "index": index,
                "size": state.book.len(),
                "average": state.book.entries()[index].average,
                "courseAverage": state.book.course_average()
            }),
        ),
        Err(e) => gradebook_err(&req.id, &req.method, &e),
    }
}

fn handle_students_search(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match required_str(req, "name") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.book.search_student(name) {
        Some(index) => ok(&req.id, json!({ "index": index })),
        None => err(
            &req.id,
            "not_found",
            "student not found",
            Some(json!({ "name": name })),
        ),
    }
}

fn handle_students_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match required_str(req, "name") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.book.get(name) {
        Some(entry) => ok(&req.id, json!({ "entry": entry })),
        None => err(
            &req.id,
            "not_found",
            "student not found",
            Some(json!({ "name": name })),
        ),
    }
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "size": state.book.len(),
            "entries": state.book.entries()
        }),
    )
}

fn handle_students_withdraw(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match required_str(req, "name") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.book.withdraw_student(name) {
        Ok(removed) => ok(
            &req.id,
            json!({
                "removed": removed,
                "size": state.book.len(),
                "courseAverage": state.book.course_average()
            }),
        ),
        Err(e) => gradebook_err(&req.id, &req.method, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.add" => Some(handle_students_add(state, req)),
        "students.search" => Some(handle_students_search(state, req)),
        "students.get" => Some(handle_students_get(state, req)),
        "students.list" => Some(handle_students_list(state, req)),
        "students.withdraw" => Some(handle_students_withdraw(state, req)),
        _ => None,
    }
}
