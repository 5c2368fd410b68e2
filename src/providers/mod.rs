pub mod http;

pub use http::HttpRateSource;
