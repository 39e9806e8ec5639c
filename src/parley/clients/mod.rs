//! Client wrappers for the six debate backends.
//!
//! All backends ride the OpenAI-compatible chat surface; everything except
//! [`openai::OpenAIClient`] delegates to it with a backend-specific base URL.

pub mod claude;
pub mod common;
pub mod deepseek;
pub mod gemini;
pub mod grok;
pub mod groq;
pub mod http_pool;
pub mod openai;
