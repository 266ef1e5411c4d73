//! Prompt domain
//!
//! Pure prompt construction: `(question, context)` in, message sequence out.

mod message;
mod template;

pub use message::{Message, Role};
pub use template::AnalysisPromptTemplate;
