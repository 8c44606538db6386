//! Structured extraction from unstructured job and resume text.
//! Both analyzers are AI-first with an unconditional rule-based fallback.

pub mod handlers;
pub mod job;
pub mod keywords;
pub mod prompts;
pub mod resume;
