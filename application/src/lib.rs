//! Application layer for askdata
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::AnalysisParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    progress::{NoProgress, StageProgressNotifier},
};
pub use use_cases::analyze_question::{AnalyzeQuestionInput, AnalyzeQuestionUseCase};
pub use use_cases::classify_feasibility::ClassifyFeasibilityUseCase;
pub use use_cases::error::AnalysisError;
pub use use_cases::select_chart::SelectChartUseCase;
pub use use_cases::synthesize_query::SynthesizeQueryUseCase;
