//! Document submission against the registration service.

mod payload;
mod submitter;
mod transport;

pub use payload::build_payload;
pub use submitter::{DocumentSubmitter, DEFAULT_BASE_URL};
pub use transport::{HttpTransport, Transport, TransportResponse};
