pub mod args;
pub mod client;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod pipeline;
pub mod schema;
pub mod storage;

pub use error::IngestError;
