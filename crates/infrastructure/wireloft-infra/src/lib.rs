pub mod api;
pub mod net;

// Re-exports for convenience
pub use api::{ApiError, HealthStatus, WireloftApi};
pub use net::{default_http_client, HttpApiClient};
