//! lexrelay: a small HTTP service that relays text-rewrite requests to an
//! external LLM provider and streams the generated chunks back to the
//! client as they arrive.
//!
//! Clients POST `{input, setting}` to `/call/{provider}`; the setting picks
//! a target reading level from the [`prompts`] catalog, the path picks a
//! backend from the [`llm`] registry, and the [`relay`] pump moves chunks
//! from the provider session into the response body one at a time.

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod llm;
pub mod prompts;
pub mod relay;
