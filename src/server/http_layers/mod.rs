mod error_body;
mod requests_logging;

pub use error_body::{render_error_body, ErrorBody};
pub use requests_logging::{log_requests, RequestsLoggingLevel};
