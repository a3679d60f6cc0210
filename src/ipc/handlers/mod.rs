pub mod core;
pub mod grades;
pub mod ranking;
pub mod reports;
pub mod setup;
pub mod students;
