// Ingest: getting raw text into the pipeline.
// Uploaded resume files are parsed locally; job postings can be fetched by URL.

pub mod documents;
pub mod fetch;
pub mod handlers;
