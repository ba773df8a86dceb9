// Resume analysis prompt templates.

pub const ANALYSIS_PROMPT: &str = r#"You are an expert resume analyzer for Ascendra. Analyze the provided resume content and return a JSON response with the following structure:

{
  "atsScore": number (0-100),
  "baselineCompetencyScore": number (0-100),
  "strengths": Array<string> (4-6 specific strengths from the resume),
  "gaps": Array<string> (4-6 areas for improvement),
  "suggestions": Array<string> (4-6 actionable suggestions),
  "extracted": {
    "skills": {
      "frontend": number (count of frontend skills),
      "backend": number (count of backend skills),
      "database": number (count of database skills),
      "ml": number (count of ML/AI skills),
      "devops": number (count of DevOps skills),
      "corecs": number (count of core CS skills)
    }
  },
  "graphs": {
    "skillDistribution": [
      {"label": "Frontend", "value": percentage},
      {"label": "Backend", "value": percentage},
      {"label": "Database", "value": percentage},
      {"label": "ML/AI", "value": percentage},
      {"label": "DevOps", "value": percentage},
      {"label": "Core CS", "value": percentage}
    ],
    "sectionScores": [
      {"label": "Impact", "value": number 0-100},
      {"label": "Clarity", "value": number 0-100},
      {"label": "Structure", "value": number 0-100},
      {"label": "Keywords", "value": number 0-100}
    ]
  },
  "analysisSource": "Ascendra Intelligence"
}

Be specific, clinical, and actionable. Focus on technical skills, project experience, and presentation quality. Avoid filler. Return strict JSON only.

Analyze this resume content:

{resume_text}"#;

pub const EXTRACTION_PROMPT: &str = r#"Extract structured information from this resume text and return ONLY valid JSON in this exact format:

{
  "personal_info": {
    "full_name": "string",
    "email": "string",
    "phone": "string",
    "location": "string"
  },
  "professional_summary": "2-3 sentence summary",
  "skills": {
    "frontend": ["React", "Vue", ...],
    "backend": ["Node.js", "Python", ...],
    "database": ["MongoDB", "PostgreSQL", ...],
    "ml": ["TensorFlow", "PyTorch", ...],
    "devops": ["Docker", "Kubernetes", ...],
    "corecs": ["Data Structures", "Algorithms", ...]
  },
  "projects": [
    {"title": "Project Name", "summary": "Brief description", "tech_stack": ["React", "Node.js"]}
  ],
  "experience": [
    {"role": "Software Engineer", "company": "Company Name", "duration": "Jan 2020 - Dec 2022", "responsibilities": ["Responsibility 1"]}
  ],
  "education": [
    {"institution": "University Name", "degree": "Bachelor of Science", "field_of_study": "Computer Science", "year": "2020"}
  ]
}

Rules:
- Use empty arrays [] if a section is not found
- Categorize skills appropriately (frontend, backend, database, ml, devops, corecs)
- {no_fabrication}

Resume content:

{resume_text}"#;
