pub mod entry;
pub mod settings;
