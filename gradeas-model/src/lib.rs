pub mod assignment_grade;
pub mod location;
pub mod paths;
pub mod types;
