pub mod client;
pub mod endpoints;
pub mod models;
pub mod normalize;
pub mod request;
pub mod transport;
