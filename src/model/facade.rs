pub mod cache;
pub mod seaorm;
