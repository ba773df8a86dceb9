// Quiz generation prompt templates.

pub const TECHNICAL_QUIZ_PROMPT: &str = r#"Generate exactly 5 multiple-choice questions for a technical assessment for a candidate with these skills: {skills}.
Difficulty Level: Intermediate to Advanced.
Focus on real-world scenarios and specific technical concepts within these areas.

For each question, provide:
- question: The question text (clear, concise, and technically accurate)
- options: Array of exactly 4 distinct options (labeled A, B, C, D)
- correctAnswer: Zero-indexed integer of the correct option (0 for A, 1 for B, 2 for C, 3 for D)
- explanation: A detailed 1-2 sentence explanation of why the answer is correct and why other key options are incorrect.

Return ONLY a valid JSON array in this exact format:
[
  {
    "question": "...",
    "options": ["...", "...", "...", "..."],
    "correctAnswer": 0,
    "explanation": "..."
  }
]

Important: Return ONLY the JSON array. Do not include any decorative text, markdown blocks, or commentary."#;

pub const ANALYTICAL_QUIZ_PROMPT: &str = r#"Generate exactly 5 multiple-choice questions for an analytical and logical reasoning assessment.
Topics: Logical deduction, sequence logic, pattern recognition, and complex problem-solving scenarios.
Difficulty: Challenging.

For each question, provide:
- question: The question text (structured logically)
- options: Array of exactly 4 plausible options (labeled A, B, C, D)
- correctAnswer: Zero-indexed integer of the correct option (0 for A, 1 for B, 2 for C, 3 for D)
- explanation: A 1-2 sentence logical breakdown of the solution.

Return ONLY a valid JSON array in this exact format:
[
  {
    "question": "...",
    "options": ["...", "...", "...", "..."],
    "correctAnswer": 0,
    "explanation": "..."
  }
]

Important: Return ONLY the JSON array. Do not include any decorative text, markdown blocks, or commentary."#;
