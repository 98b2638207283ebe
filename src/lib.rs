//! # roastgen
//!
//! HTTP service that generates short roast one-liners. A request names a
//! sentence template, a humor style, and an intensity level; the service
//! asks the OpenAI Chat Completions API for a short fragment, cleans it,
//! checks it against a bounded recency cache so back-to-back jokes don't
//! land on the same subject, and returns the fragment wrapped in the
//! template's sentence frame.

pub mod cache;
pub mod cleaner;
pub mod error;
pub mod profiles;
pub mod prompt;
pub mod provider;
pub mod server;
pub mod themes;

pub use cache::RecencyCache;
pub use error::RoastError;
pub use profiles::{SamplingConfig, Template};
pub use provider::{CompletionProvider, OpenAiCompletion};
pub use server::{app_router, AppState};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
