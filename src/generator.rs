//! The external card generator.
//!
//! The generator is a black box: a prompt goes in, text comes out. The reply
//! may be a JSON card, a JSON card wrapped in prose or code fences, plain
//! text, or garbage. Callers must never trust its shape; see
//! [`RawCard`](crate::RawCard).

use async_trait::async_trait;

use crate::Result;

/// A text generator, typically a hosted language model.
///
/// This allows plugging in different providers (hosted APIs, local models,
/// canned replies in tests) behind an `Arc<dyn Generator>`.
///
/// ## Example
///
/// ```rust
/// use async_trait::async_trait;
/// use microcards::{Generator, Result};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Generator for Echo {
///     async fn generate(&self, prompt: &str) -> Result<String> {
///         Ok(prompt.to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce a reply for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Generation`](crate::Error::Generation) when the
    /// provider is unreachable or refuses the request.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
