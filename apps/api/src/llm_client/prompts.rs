// Cross-cutting prompt fragments shared by every LLM-backed feature.
// Feature-specific prompts live in a prompts.rs next to the feature.

/// Appended to system prompts whose output is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Audience framing: every answer is read by a student or recent graduate.
pub const STUDENT_AUDIENCE: &str = "Your audience is students and recent graduates \
    looking for internships, part-time roles, and entry-level positions. \
    Keep advice concrete and encouraging.";
