pub mod data_source;
pub mod memory_store;
pub mod toml_store;

pub use data_source::{BulletinDataSource, MarkStore};
pub use memory_store::InMemoryDataSource;
pub use toml_store::TomlDataSource;
