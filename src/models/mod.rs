//! Record models consumed by the query engine.
//!
//! Field names follow the backend's snake_case JSON contract.

mod datastore;
mod family;
mod member;
mod offering;
mod prayer;

pub use datastore::*;
pub use family::*;
pub use member::*;
pub use offering::*;
pub use prayer::*;

/// Records carrying a stable integer identity within their collection.
pub trait Identified {
    fn id(&self) -> i64;
}

impl Identified for Member {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Family {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Offering {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Prayer {
    fn id(&self) -> i64 {
        self.id
    }
}
