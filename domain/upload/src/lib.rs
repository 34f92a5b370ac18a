pub mod command;
pub mod exception;
#[cfg(feature = "mock")]
pub mod mock;
pub mod model;
pub mod service;
