// Resume generation: job requirements + candidate profile → tailored resume text.
// Model output is used verbatim when available; otherwise the template engine fills in.
// All LLM calls go through llm_client; no direct Anthropic SDK calls here.

pub mod handlers;
pub mod prompts;
pub mod selector;
pub mod synthesizer;
pub mod templates;
