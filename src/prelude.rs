pub use crate::erx::{Erx, ResultE, ResultEX};
pub use crate::filter::clause::{Clauses, FilterClause};
pub use crate::filter::FilterOperator;
pub use crate::query::envelope::{Dir, Envelope, RequestKind, Resolved};
pub use crate::query::mapping::{FieldMap, FieldType};
pub use crate::query::predicate::SqlBuilder;
pub use crate::web::api::Out;
pub use crate::web::messages::list::PagedList;
