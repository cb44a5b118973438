pub mod envelope;
pub mod mapping;
pub mod predicate;
