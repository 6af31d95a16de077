//! Record query engine.
//!
//! Pure functions over in-memory record collections: text and discrete
//! filtering, date-derived fields, grouped statistics and paging. Nothing in
//! here touches shared state, so every function is safe to call from any
//! number of handlers at once.

mod dates;
mod filters;
mod matcher;
mod pagination;
mod reports;
mod stats;

pub use dates::*;
pub use filters::*;
pub use matcher::*;
pub use pagination::*;
pub use reports::*;
pub use stats::*;
