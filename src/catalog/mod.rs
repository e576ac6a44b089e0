pub mod heroes;
pub mod maps;

pub use heroes::{HeroCatalog, Role, LINEUP};
pub use maps::MapCatalog;
