pub mod add;
pub mod archive;
pub mod config;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod recover;
pub mod settings;
pub mod stats;
pub mod undo;
