// Business logic services

pub mod exercise_service;
pub mod log_service;
pub mod user_service;

pub use exercise_service::ExerciseService;
pub use log_service::LogService;
pub use user_service::UserService;
