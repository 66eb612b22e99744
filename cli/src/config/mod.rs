//! Settings store location and persistence

pub mod loader;
pub mod store;

pub use loader::StoreLocator;
pub use store::SettingsStore;
