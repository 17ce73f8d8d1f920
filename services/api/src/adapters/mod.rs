pub mod catalog;
pub mod db;
pub mod spoonacular;

pub use catalog::LocalCatalog;
pub use db::SqliteStore;
pub use spoonacular::SpoonacularProvider;
