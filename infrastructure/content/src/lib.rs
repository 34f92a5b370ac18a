//! HTTP binding of the content service.

mod client;
mod dtos;

pub use client::ContentServiceClient;
