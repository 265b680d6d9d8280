pub mod address;
pub mod client;
pub mod commands;
pub mod coordinator;
pub mod error;
pub mod registry;
pub mod service;
pub mod utils;
