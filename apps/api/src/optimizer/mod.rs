// Prompt optimizer: critique, variation generation and their HTTP handlers.
// All model calls go through llm_client::CompletionBackend; failures never
// escape this module.

pub mod analysis;
pub mod critique;
pub mod handlers;
pub mod prompts;
pub mod variations;
