// Prompt fragments shared by several features. Feature-specific prompts live
// in each feature's own prompts.rs.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to prompts that consume external data (resumes, JDs, web results).
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    Extract only what is explicitly present in the provided input. \
    Never invent names, links, dates or metrics. \
    If a value is missing, use an empty array or \"not specified\".";
