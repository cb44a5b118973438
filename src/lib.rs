// Don't change this value, it will be replaced by the commit build time
pub static COMMIT_BUILD: &'static str = "00000000000000";

// Don't change this value, it will be replaced by the version
pub static VERSION: &'static str = "0.1.0 - Dev";

pub mod conf;
pub mod erx;
pub mod filter;
pub mod log;
pub mod macros;
pub mod model;
pub mod prelude;
pub mod query;
pub mod web;

pub use prelude::*;
