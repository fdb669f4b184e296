//! HTTP implementation of the remote data capabilities.

pub mod fetch_utils;
pub mod http_client;
pub mod remote;
pub mod urls;

pub use fetch_utils::RetryPolicy;
pub use http_client::create_http_client_with_timeout;
pub use remote::HttpRemoteDataSource;
pub use urls::*;
