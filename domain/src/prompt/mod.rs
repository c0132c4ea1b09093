//! Prompt rendering for the LLM requests

pub mod template;

pub use template::InterviewPromptTemplate;
