// Prompts for JD benchmark extraction, gap analysis and course lookup.

pub const JD_BENCHMARK_PROMPT: &str = "You are a data extractor.
Analyze the following Job Description text and extract the Top 5 most important technical skills.
For each skill, determine a 'Benchmark Score' (0-100) representing its importance level (e.g., Required = 90+, Preferred = 70+, Nice-to-have = 50+).

RETURN ONLY A VALID JSON ARRAY. NO MARKDOWN. NO EXPLANATIONS.
Format:
[
  { \"skill\": \"Skill Name\", \"benchmark\": 90 }
]

Job Description:
{jd_text}";

pub const GAP_ANALYSIS_PROMPT: &str = "Analyze the skill gap between the Student and {target}'s requirements.

Student Skills: {student_skills}
Target Benchmark: {benchmarks}

Task:
1. Perform a Semantic Match. Even if skill names don't match exactly (e.g., \"Basic Prompt Engineering\" vs \"Agentic AI\"), estimate the student's score for the BENCHMARK skill based on their skills.
2. Generate structured data for a Radar Chart. The Chart must show the specific skills listed in the Target Benchmark.
   - 'skill': The name of the benchmark skill.
   - 'benchmark': The required score (from the benchmark object).
   - 'student': The estimated student score (0-100) for that specific benchmark skill.
3. Create a 3-step Upskilling Plan to bridge the biggest gaps.

Return ONLY valid JSON matching this structure:
{
  \"radarData\": [
    { \"skill\": \"string\", \"student\": number, \"benchmark\": number }
  ],
  \"upskillingPlan\": [
    { \"step\": \"string\", \"title\": \"string\", \"description\": \"string\" }
  ]
}";

pub const COURSES_PROMPT: &str = "Recommend the top 3 high-quality online courses for {module}.
Return ONLY a valid JSON array of objects with these exact keys:
- title: string (Course Name)
- platform: string (e.g. Coursera, Udemy, YouTube)
- url: string (Direct link)

Example response:
[
  {\"title\": \"Advanced React Patterns\", \"platform\": \"Frontend Masters\", \"url\": \"https://frontendmasters.com/courses/advanced-react-patterns/\"}
]

Do not include any markdown formatting or conversational text.";
