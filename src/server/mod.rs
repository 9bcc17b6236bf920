mod endpoint;

pub use endpoint::LiveEndpoint;
