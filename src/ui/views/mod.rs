pub mod build;
pub mod clean;
pub mod doctor;
