// All LLM prompt constants for the Interview Prep module.
// Placeholders are `{name}` and are filled by the builders in coach.rs.

/// System prompt for question generation; paired with the JSON-only instruction.
pub const QUESTIONS_SYSTEM: &str = "You are an expert interview coach. Generate realistic \
    interview questions based on the job details provided. Focus on role-specific technical \
    skills, behavioral questions, and company culture fit.";

/// Question generation template.
/// Replace: {job_title}, {company}, {industry}, {experience}, {job_description}, {question_type}
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Generate interview questions for:
Job Title: {job_title}
Company: {company}
Industry: {industry}
Experience Level: {experience}
Job Description: {job_description}
Question Type: {question_type}

Return a JSON object with this EXACT schema (no extra fields):
{
  "questions": [
    {
      "question": "Tell me about a time you resolved a disagreement within a team.",
      "category": "behavioral",
      "difficulty": "medium"
    }
  ]
}

Rules:
- Return between 5 and 7 questions.
- "category" is exactly one of: "technical", "behavioral", "cultural".
- "difficulty" is exactly one of: "easy", "medium", "hard".
- If Question Type is not "mixed", every question must use that category."#;

/// System prompt for answer analysis; paired with the JSON-only instruction.
pub const ANALYSIS_SYSTEM: &str = "You are an interview coach analyzing a candidate's \
    practice answer. Judge content quality and relevance, confidence, and sentiment, and \
    explain how the answer could be structured better.";

/// Answer analysis template.
/// Replace: {question}, {response}, {job_title}, {company}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this interview response:
Question: {question}
Response: {response}
Job Context: {job_title} at {company}

Return a JSON object with this EXACT schema (no extra fields):
{
  "content_feedback": "How relevant and complete the answer is.",
  "confidence": 7,
  "sentiment": "positive",
  "improvements": ["Quantify the outcome", "Name your specific role"],
  "suggested_structure": "Situation, Task, Action, Result, each in one or two sentences."
}

Rules:
- "confidence" is an integer from 1 to 10.
- "sentiment" is exactly one of: "positive", "neutral", "negative"."#;

pub const INSIGHTS_SYSTEM: &str = "You are a career advisor with deep knowledge of companies \
    and industries. Describe the company's interview process, culture, values, and what they \
    typically look for in candidates. Include tips for success and common interview themes.";

/// Replace: {company}, {industry}, {job_title}
pub const INSIGHTS_PROMPT_TEMPLATE: &str =
    "Provide interview insights for {company} in the {industry} industry for a {job_title} position.";

pub const BODY_LANGUAGE_SYSTEM: &str = "You are a communication expert specializing in body \
    language and non-verbal communication during interviews. Provide specific, actionable tips \
    for body language, eye contact, posture, and presentation skills.";

/// Replace: {job_title}, {company}
pub const BODY_LANGUAGE_PROMPT_TEMPLATE: &str =
    "Provide body language and presentation tips for a {job_title} interview at {company}.";

pub const PLATFORM_SYSTEM: &str = "You are a helpful assistant for the StudentJobs platform. \
    Answer questions about the website, job search features, the application process, and \
    general career advice. Be informative and helpful.";

/// Replace: {question}
pub const PLATFORM_PROMPT_TEMPLATE: &str = "User question about StudentJobs platform: {question}";
