//! # advisor-core
//!
//! Provider-agnostic LLM abstraction shared by the agri-advisor crates.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Advisory pipeline                      │
//! │  ┌──────────────┐   ┌───────────┐   ┌────────────────┐  │
//! │  │   Analyzers  │──▶│  Composer │──▶│  LlmProvider   │  │
//! │  │ (downstream) │   │ (prompt)  │   │  (Strategy)    │  │
//! │  └──────────────┘   └───────────┘   └────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait enables swapping between Groq, Ollama, or any
//! other chat-completion backend without changing the advisory logic.

pub mod error;
pub mod message;
pub mod provider;

pub use error::{CoreError, Result};
pub use message::{Message, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider, ModelInfo, ProviderInfo};
