//! Prompt templates for the three decision stages
//!
//! Every builder returns the same shape: the data context as the system
//! message, the question as the user message, and the stage instructions as
//! an assistant turn that primes the model's answer.

use super::message::Message;

/// Templates for generating the message sequence of each stage
pub struct AnalysisPromptTemplate;

impl AnalysisPromptTemplate {
    /// User turn framing the question
    pub fn question_prompt(question: &str) -> String {
        format!(
            "A C-Level manager at this e-commerce company has the following questions: {}",
            question
        )
    }

    /// Instructions for the feasibility stage
    pub fn feasibility_instructions() -> &'static str {
        r#"You have the following options to choose from:
* It is feasible, we can use one of the sql queries mentioned above to answer the question.
* It is partially feasible, given the data we can build a new sql query that answers the question.
* It is not feasible, given the data available it is not possible to answer this question.

Prioritize using sql queries that you have already created.
You can expect the user to do simple calculations by hand. For instance, if you are showing top 10 highest costs, you can expect the user to identify the top 3.
Or, if you are showing the revenue over time, you can expect the user to identify the maximum or minimum values.

Think step by step.

Output one of these three words:
- feasible
- partially feasible
- not feasible"#
    }

    /// Instructions for the chart selection stage
    pub fn chart_selection_instructions() -> &'static str {
        r#"Think step by step. First identify the sql query that is needed to answer the question. Then check which one of the available sql queries can be used.
You have the following options to choose from:
* sql query 1
* sql query 2

Output one of these two numbers:
- 1
- 2"#
    }

    /// Instructions for the query synthesis stage
    pub fn query_synthesis_instructions() -> &'static str {
        r#"Think step by step. Consider the available tables. Make a sql query that answers the question.
Output a runnable sql query. Only output the code block. Do not output any explanation."#
    }

    pub fn feasibility_messages(question: &str, context: &str) -> Vec<Message> {
        Self::messages(question, context, Self::feasibility_instructions())
    }

    pub fn chart_selection_messages(question: &str, context: &str) -> Vec<Message> {
        Self::messages(question, context, Self::chart_selection_instructions())
    }

    pub fn query_synthesis_messages(question: &str, context: &str) -> Vec<Message> {
        Self::messages(question, context, Self::query_synthesis_instructions())
    }

    fn messages(question: &str, context: &str, instructions: &str) -> Vec<Message> {
        vec![
            Message::system(context),
            Message::user(Self::question_prompt(question)),
            Message::assistant(instructions),
        ]
    }
}
