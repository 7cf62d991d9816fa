//! `autocontent-client`: configuration and transport for the content service.

pub mod config;
pub mod http;
pub mod service;

pub use config::{ConfigError, ServiceConfig, ServiceMode};
pub use http::HttpContentService;
pub use service::{ContentService, Route};
