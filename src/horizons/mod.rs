mod common;
pub mod extract;
pub mod http_client;
mod vector_request;

pub use common::HorizonsError;
pub use http_client::HTTPClient;
pub use vector_request::VectorRequest;
