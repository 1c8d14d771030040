// Interview prep: question generation, answer analysis, company insights and
// presentation tips from the hosted LLM, plus the practice history table.
// All LLM calls go through llm_client via the InterviewCoach trait.

pub mod coach;
pub mod handlers;
pub mod history;
pub mod prompts;
