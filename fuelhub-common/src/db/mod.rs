//! Database schema, models and content queries

pub mod categories;
pub mod comparisons;
pub mod init;
pub mod migrations;
pub mod models;
pub mod posts;
pub mod tools;

pub use categories::*;
pub use comparisons::*;
pub use init::*;
pub use migrations::*;
pub use models::*;
pub use posts::*;
pub use tools::*;
