pub mod config;
pub mod logging;

pub mod catalog;
pub mod credentials;
pub mod error;
pub mod fetcher;
pub mod resolver;
pub mod storage;
pub mod template;
pub mod transport;
