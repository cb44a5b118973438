pub mod facade;

use crate::erx;

pub type One<T> = erx::ResultE<Option<T>>;
pub type Many<T> = erx::ResultE<Vec<T>>;

/// A filtered page plus the unpaged total, the raw material of a grid
/// response.
pub struct Paged<T> {
    records: Vec<T>,
    total: usize,
}

impl<T> Paged<T> {
    pub fn new(records: Vec<T>, total: usize) -> Self {
        Self { records, total }
    }

    pub fn records(&self) -> &Vec<T> {
        &self.records
    }

    pub fn records_count(&self) -> usize {
        self.records.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn into_parts(self) -> (Vec<T>, usize) {
        (self.records, self.total)
    }
}
