pub mod auth;
pub mod connect;
pub mod list;
pub mod log;
pub mod stats;
