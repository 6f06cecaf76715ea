//! # advisor-runtime
//!
//! Runtime LLM providers for the agri-advisor system.
//!
//! ## Providers
//!
//! - **Groq** (default): hosted inference over the OpenAI-compatible
//!   chat-completions API
//!
//! ## Usage
//!
//! ```rust,ignore
//! use advisor_runtime::GroqProvider;
//!
//! let provider = GroqProvider::from_env()?;
//! let completion = provider.complete(&messages, &options).await?;
//! ```

pub mod groq;

pub use groq::{GroqConfig, GroqProvider};

// Re-export core types for convenience
pub use advisor_core::{
    Completion, CoreError, GenerationOptions, LlmProvider, Message, Result, Role,
};
