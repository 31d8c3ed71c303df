pub mod http;
#[cfg(test)]
pub mod mock;
pub mod traits;

pub use http::ReqwestTransport;
pub use traits::{HttpResponse, HttpTransport};
