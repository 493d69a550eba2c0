pub mod client;
pub mod transport;

pub use client::{encode_data_uri, ReplicateClient, MAX_IMAGE_BYTES};
pub use transport::{HttpTransport, PredictionTransport};
