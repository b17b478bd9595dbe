//! Store traits (ports) implemented by the infrastructure layer

mod store;

pub use store::{GraphStore, GraphTransaction, RepoResult};
