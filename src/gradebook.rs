use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;

pub const NUM_ASSIGNMENTS: usize = 4;
pub const MAX_ENTRIES: usize = 100;
/// Includes the terminator slot, so the longest accepted name is one byte shorter.
pub const MAX_NAME_LENGTH: usize = 50;
pub const INVALID_GTID: i64 = -1;
pub const TOP_COUNT: usize = 5;
pub const DEFAULT_WEIGHTS: [f64; NUM_ASSIGNMENTS] = [0.25, 0.25, 0.25, 0.25];

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

pub type Grades = [f64; NUM_ASSIGNMENTS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Major {
    CS,
    CE,
    EE,
    IE,
}

impl Major {
    const ALL: [(Major, &'static str); 4] = [
        (Major::CS, "CS"),
        (Major::CE, "CE"),
        (Major::EE, "EE"),
        (Major::IE, "IE"),
    ];

    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(m, _)| *m)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Major::CS => "CS",
            Major::CE => "CE",
            Major::EE => "EE",
            Major::IE => "IE",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GradebookError {
    #[error("student name is {len} bytes; at most {max} allowed")]
    NameTooLong { len: usize, max: usize },
    #[error("unknown major code: {0}")]
    UnknownMajor(String),
    #[error("a student named {0} already exists")]
    DuplicateName(String),
    #[error("a student with GTID {0} already exists")]
    DuplicateGtid(i64),
    #[error("gradebook is full ({capacity} students)")]
    Full { capacity: usize },
    #[error("student not found: {0}")]
    NotFound(String),
    #[error("entry index {index} out of range (size {size})")]
    EntryOutOfRange { index: usize, size: usize },
    #[error("assignment index {index} out of range ({count} assignments)")]
    AssignmentOutOfRange { index: usize, count: usize },
    #[error("gradebook is empty")]
    Empty,
    #[error("invalid weights: {0}")]
    InvalidWeights(String),
}

impl GradebookError {
    /// Stable error code used in IPC error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            GradebookError::NameTooLong { .. }
            | GradebookError::UnknownMajor(_)
            | GradebookError::AssignmentOutOfRange { .. }
            | GradebookError::EntryOutOfRange { .. }
            | GradebookError::InvalidWeights(_) => "bad_params",
            GradebookError::DuplicateName(_) | GradebookError::DuplicateGtid(_) => "duplicate",
            GradebookError::Full { .. } => "capacity_exhausted",
            GradebookError::NotFound(_) => "not_found",
            GradebookError::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub name: String,
    pub gtid: i64,
    pub year: i64,
    pub major: Major,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradebookEntry {
    pub student: Student,
    pub grades: Grades,
    pub average: f64,
}

impl GradebookEntry {
    fn new(student: Student) -> Self {
        Self {
            student,
            grades: [0.0; NUM_ASSIGNMENTS],
            average: 0.0,
        }
    }

    /// Weighted sum of the grades; stores and returns the new average.
    pub fn recalculate(&mut self, weights: &Grades) -> f64 {
        self.average = weighted_average(&self.grades, weights);
        self.average
    }
}

pub fn weighted_average(grades: &Grades, weights: &Grades) -> f64 {
    grades
        .iter()
        .zip(weights.iter())
        .map(|(g, w)| w * g)
        .sum()
}

pub fn validate_weights(weights: &Grades) -> Result<(), GradebookError> {
    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(GradebookError::InvalidWeights(format!(
            "weight {w} must be finite and >= 0"
        )));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(GradebookError::InvalidWeights(format!(
            "weights sum to {sum}, expected 1"
        )));
    }
    Ok(())
}

#[derive(Debug)]
pub struct Gradebook {
    entries: Vec<GradebookEntry>,
    capacity: usize,
    max_name_length: usize,
    weights: Grades,
    assignment_averages: Grades,
    course_average: f64,
}

impl Default for Gradebook {
    fn default() -> Self {
        Self::new(MAX_ENTRIES, MAX_NAME_LENGTH, DEFAULT_WEIGHTS)
    }
}

impl Gradebook {
    pub fn new(capacity: usize, max_name_length: usize, weights: Grades) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            max_name_length,
            weights,
            assignment_averages: [0.0; NUM_ASSIGNMENTS],
            course_average: 0.0,
        }
    }

    pub fn entries(&self) -> &[GradebookEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_name_length(&self) -> usize {
        self.max_name_length
    }

    pub fn weights(&self) -> &Grades {
        &self.weights
    }

    pub fn assignment_averages(&self) -> &Grades {
        &self.assignment_averages
    }

    pub fn course_average(&self) -> f64 {
        self.course_average
    }

    pub fn add_student(
        &mut self,
        name: &str,
        gtid: i64,
        year: i64,
        major: &str,
    ) -> Result<usize, GradebookError> {
        let major = Major::parse(major).ok_or_else(|| GradebookError::UnknownMajor(major.into()))?;
        let max = self.max_name_length.saturating_sub(1);
        if name.len() > max {
            return Err(GradebookError::NameTooLong {
                len: name.len(),
                max,
            });
        }
        if self.search_student(name).is_some() {
            return Err(GradebookError::DuplicateName(name.to_string()));
        }
        if self.entries.iter().any(|e| e.student.gtid == gtid) {
            return Err(GradebookError::DuplicateGtid(gtid));
        }
        if self.entries.len() >= self.capacity {
            return Err(GradebookError::Full {
                capacity: self.capacity,
            });
        }

        self.entries.push(GradebookEntry::new(Student {
            name: name.to_string(),
            gtid,
            year,
            major,
        }));
        self.refresh_course_average();
        tracing::debug!(name, gtid, size = self.entries.len(), "student added");
        Ok(self.entries.len() - 1)
    }

    pub fn add_student_with_grades(
        &mut self,
        name: &str,
        gtid: i64,
        year: i64,
        major: &str,
        grades: &Grades,
    ) -> Result<usize, GradebookError> {
        if self.entries.len() >= self.capacity {
            return Err(GradebookError::Full {
                capacity: self.capacity,
            });
        }
        let index = self.add_student(name, gtid, year, major)?;
        let weights = self.weights;
        let entry = &mut self.entries[index];
        entry.grades = *grades;
        entry.recalculate(&weights);
        self.refresh_course_average();
        Ok(index)
    }

    pub fn update_grade(
        &mut self,
        name: &str,
        assignment: usize,
        new_grade: f64,
    ) -> Result<f64, GradebookError> {
        let index = self
            .search_student(name)
            .ok_or_else(|| GradebookError::NotFound(name.to_string()))?;
        if assignment >= NUM_ASSIGNMENTS {
            return Err(GradebookError::AssignmentOutOfRange {
                index: assignment,
                count: NUM_ASSIGNMENTS,
            });
        }
        self.entries[index].grades[assignment] = new_grade;
        let average = self.calculate_average(index)?;
        self.refresh_course_average();
        tracing::debug!(name, assignment, new_grade, average, "grade updated");
        Ok(average)
    }

    pub fn calculate_average(&mut self, index: usize) -> Result<f64, GradebookError> {
        let size = self.entries.len();
        let weights = self.weights;
        self.entries
            .get_mut(index)
            .map(|e| e.recalculate(&weights))
            .ok_or(GradebookError::EntryOutOfRange { index, size })
    }

    /// Mean of each grade slot, and the mean of the per-student averages.
    /// An empty gradebook zeroes every derived value and reports `Empty`.
    pub fn calculate_course_average(&mut self) -> Result<f64, GradebookError> {
        if self.entries.is_empty() {
            self.reset_averages();
            return Err(GradebookError::Empty);
        }

        let n = self.entries.len() as f64;
        for (slot, avg) in self.assignment_averages.iter_mut().enumerate() {
            let column_sum: f64 = self.entries.iter().map(|e| e.grades[slot]).sum();
            *avg = column_sum / n;
        }
        let average_sum: f64 = self.entries.iter().map(|e| e.average).sum();
        self.course_average = average_sum / n;
        Ok(self.course_average)
    }

    pub fn search_student(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.student.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&GradebookEntry> {
        self.search_student(name).map(|i| &self.entries[i])
    }

    pub fn withdraw_student(&mut self, name: &str) -> Result<GradebookEntry, GradebookError> {
        let index = self
            .search_student(name)
            .ok_or_else(|| GradebookError::NotFound(name.to_string()))?;
        // Vec::remove shifts the tail down, keeping relative order.
        let removed = self.entries.remove(index);
        self.refresh_course_average();
        tracing::debug!(name, size = self.entries.len(), "student withdrawn");
        Ok(removed)
    }

    /// GTIDs of the five highest averages, padded with `INVALID_GTID`.
    /// Leaves the entries sorted by descending average.
    pub fn top_five_gtid(&mut self) -> Result<[i64; TOP_COUNT], GradebookError> {
        self.sort_averages()?;
        let mut gtids = [INVALID_GTID; TOP_COUNT];
        for (slot, entry) in gtids.iter_mut().zip(self.entries.iter()) {
            *slot = entry.student.gtid;
        }
        Ok(gtids)
    }

    pub fn sort_name(&mut self) -> Result<(), GradebookError> {
        if self.entries.is_empty() {
            return Err(GradebookError::Empty);
        }
        self.entries
            .sort_by(|a, b| a.student.name.as_bytes().cmp(b.student.name.as_bytes()));
        Ok(())
    }

    pub fn sort_averages(&mut self) -> Result<(), GradebookError> {
        if self.entries.is_empty() {
            return Err(GradebookError::Empty);
        }
        self.entries.sort_by(|a, b| {
            b.average
                .partial_cmp(&a.average)
                .unwrap_or(Ordering::Equal)
        });
        Ok(())
    }

    pub fn set_weights(&mut self, weights: Grades) -> Result<(), GradebookError> {
        validate_weights(&weights)?;
        self.weights = weights;
        for entry in &mut self.entries {
            entry.recalculate(&weights);
        }
        self.refresh_course_average();
        Ok(())
    }

    fn refresh_course_average(&mut self) {
        // Empty is a valid state after a withdraw; averages are zeroed either way.
        let _ = self.calculate_course_average();
    }

    fn reset_averages(&mut self) {
        self.assignment_averages = [0.0; NUM_ASSIGNMENTS];
        self.course_average = 0.0;
    }
}
