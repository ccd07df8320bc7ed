pub mod gemini;
pub mod openai;
pub mod provider;
pub mod registry;
pub mod sse;

pub use provider::ProviderAdapter;
pub use registry::ProviderRegistry;
