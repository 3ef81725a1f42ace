//! Chat with Karu
//!
//! Talks to Gemini and keeps the conversation history.

pub mod client;

pub use client::{ChatError, ChatProvider, ChatSession, GeminiClient, MISSING_KEY_MESSAGE};
