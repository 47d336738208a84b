// Domain documents and wire-format shapes

pub mod exercise;
pub mod user;

pub use exercise::{AddExerciseResponse, Exercise, ExerciseLog, LogEntry};
pub use user::{CreateUserRequest, User, UserResponse};
