// Grid projection returned by list endpoints

use crate::query::envelope::Envelope;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedList<T> {
    pub subset: Vec<T>,
    pub total_item_count: usize,
    pub skip: i64,
    pub take: i64,
}

impl<T> PagedList<T> {
    pub fn new(subset: Vec<T>, total_item_count: usize, skip: i64, take: i64) -> Self {
        Self { subset, total_item_count, skip, take }
    }

    /// page the subset the way the envelope asked for it
    pub fn of(subset: Vec<T>, total_item_count: usize, envelope: &Envelope) -> Self {
        Self { subset, total_item_count, skip: envelope.skip(), take: envelope.take() }
    }

    pub fn total_pages(&self) -> usize {
        if self.take <= 0 {
            0
        } else {
            (self.total_item_count + self.take as usize - 1) / self.take as usize
        }
    }

    pub fn has_next(&self) -> bool {
        self.take > 0 && (self.skip + self.take) < self.total_item_count as i64
    }

    pub fn has_prev(&self) -> bool {
        self.skip > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_is_camel_case() {
        let list = PagedList::new(vec!["a", "b"], 42, 0, 20);
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"{"subset":["a","b"],"totalItemCount":42,"skip":0,"take":20}"#);
    }

    #[test]
    fn page_math() {
        let list = PagedList::new(vec![0; 10], 42, 10, 10);
        assert_eq!(list.total_pages(), 5);
        assert!(list.has_next());
        assert!(list.has_prev());

        let last = PagedList::new(vec![0; 2], 42, 40, 10);
        assert!(!last.has_next());
    }
}
