//! # cardinal-client
//!
//! Client-side theme runtime for Cardinal shells (desktop, web view).
//! Fetches the caller's theme from the API, projects it onto CSS custom
//! properties, and keeps a single-entry local cache as the offline/error
//! fallback — never as the source of truth.

pub mod cache;
pub mod error;
pub mod http;
pub mod provider;
pub mod runtime;

pub use cache::ThemeCache;
pub use error::ClientError;
pub use http::ThemeClient;
pub use provider::{ThemeProvider, ThemeTransport};
pub use runtime::ThemeRuntime;
