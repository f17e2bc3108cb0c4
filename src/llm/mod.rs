//! LLM Provider Clients and Abstractions
//!
//! This module provides a unified interface for the text-generation backends
//! the book search tool summarizes results with.
//!
//! # Architecture
//!
//! - [`LLMClient`] - The core trait that all backends implement
//! - [`Provider`] - Runtime backend selection, resolved from `bookwise.toml`
//!
//! # Supported Providers
//!
//! - Workers AI - Cloudflare hosted models (always available)
//! - `ollama` - Local Ollama server (Cargo feature)
//!
//! # Example
//!
//! ```ignore
//! use bookwise::llm::Provider;
//! use bookwise::types::ChatMessage;
//!
//! let client = provider.create_client().await?;
//! let output = client.chat(&[ChatMessage::user("What is 2+2?")]).await?;
//! println!("{}", output.into_text());
//! ```

/// Core LLM client trait and provider selection.
pub mod client;
/// Cloudflare Workers AI REST client.
pub mod workers_ai;

#[cfg(feature = "ollama")]
pub mod ollama;

pub use client::{InferenceOutput, LLMClient, Provider};
