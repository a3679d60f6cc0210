use crate::gradebook::{Gradebook, GradebookError};
use std::fmt::Write;

pub const SUMMARY_HEADER: &str = "Overall Averages:";

/// Two-decimal rounding, half away from zero.
pub fn round_off_2_decimals(x: f64) -> f64 {
    let scaled = x * 100.0;
    if !scaled.is_finite() {
        // Magnitudes this large have no fractional part.
        return x;
    }
    scaled.round() / 100.0
}

fn fmt2(x: f64) -> String {
    format!("{:.2}", round_off_2_decimals(x))
}

/// Renders the gradebook in store order:
///
/// ```text
/// name,major,grade1,...,gradeN,average
///
/// Overall Averages:
/// avg1,...,avgN,course_average
/// ```
pub fn render_gradebook(book: &Gradebook) -> Result<String, GradebookError> {
    if book.is_empty() {
        return Err(GradebookError::Empty);
    }

    let mut out = String::new();
    for entry in book.entries() {
        let mut cols = vec![entry.student.name.clone(), entry.student.major.as_str().to_string()];
        cols.extend(entry.grades.iter().map(|g| fmt2(*g)));
        cols.push(fmt2(entry.average));
        let _ = writeln!(out, "{}", cols.join(","));
    }

    out.push('\n');
    out.push_str(SUMMARY_HEADER);
    out.push('\n');

    let mut summary: Vec<String> = book.assignment_averages().iter().map(|a| fmt2(*a)).collect();
    summary.push(fmt2(book.course_average()));
    let _ = writeln!(out, "{}", summary.join(","));
    Ok(out)
}
