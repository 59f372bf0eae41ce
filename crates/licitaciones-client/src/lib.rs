//! Backend client for the licitaciones service
//!
//! [`HttpBackend`] implements the core [`Backend`](licitaciones_core::Backend)
//! seam on top of a shared `reqwest::Client`.

pub mod http;

pub use http::HttpBackend;
