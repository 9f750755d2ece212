pub mod config;
pub mod error;
pub mod keys;
pub mod memory;
pub mod query;
pub mod record;
pub mod repo;
pub mod value;

pub use config::Config;
pub use error::CartazError;
pub use memory::MemoryRepository;
pub use query::*;
pub use record::*;
pub use repo::ContentRepository;
pub use value::{parse_date, FieldValue};
