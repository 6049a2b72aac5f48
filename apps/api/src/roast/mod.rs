// Roast acquisition: prompt formatting, response parsing, canned fallbacks,
// and the controller that ties them together.
// All model calls go through llm_client::CompletionService.

pub mod controller;
pub mod fallback;
pub mod parser;
pub mod prompts;

pub use controller::AcquisitionController;
pub use fallback::FallbackPool;
