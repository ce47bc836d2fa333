//! Laptop storage: the store abstraction, its in-memory implementation and
//! the search predicate.

pub mod error;
pub mod filter;
pub mod store;

pub use error::StoreError;
pub use filter::{is_qualified, to_bit};
pub use store::{InMemoryLaptopStore, LaptopStore};
