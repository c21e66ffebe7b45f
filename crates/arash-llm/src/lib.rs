//! LLM provider abstraction for the Arash finance assistant
//!
//! This crate provides provider-agnostic types for chat-completion calls:
//!
//! - Message types for LLM communication
//! - Completion request/response types
//! - Provider trait for LLM implementations
//! - An OpenAI-compatible provider implementation

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LlmError, Result};
pub use messages::{Message, Role};
pub use provider::LlmProvider;
pub use providers::{OpenAiConfig, OpenAiProvider};
