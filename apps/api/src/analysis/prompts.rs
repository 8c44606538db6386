// LLM prompt constants for the Analysis module.

/// System prompt for job posting analysis.
pub const JOB_ANALYSIS_SYSTEM: &str =
    "You are an expert technical recruiter. \
    Analyze a job posting and extract structured requirements. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object.";

/// Job analysis prompt template. Replace `{job_text}` before sending.
pub const JOB_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following job posting and return a JSON object with this EXACT schema:
{
  "jobTitle": "Senior Backend Engineer",
  "technicalSkills": ["python", "aws"],
  "softSkills": ["communication"],
  "yearsRequired": 5,
  "experienceLevel": "senior",
  "industry": "fintech",
  "responsibilities": ["Design and operate payment APIs"],
  "educationRequired": true
}

Rules:
- technicalSkills and softSkills: lower-case, each listed once.
- experienceLevel: one of "entry", "mid", "senior", "lead".
- industry: one of "fintech", "healthcare", "ecommerce", "saas", "startup", "enterprise", "technology".
- responsibilities: at most 5 short sentences taken from the posting.
- yearsRequired: integer; use 3 when the posting does not say.

JOB POSTING:
{job_text}"#;

/// System prompt for resume analysis.
pub const RESUME_ANALYSIS_SYSTEM: &str =
    "You are an expert resume parser. \
    Extract structured candidate information from resume text exactly as written. \
    Do NOT invent details that are not present. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object.";

/// Resume analysis prompt template. Replace `{resume_text}` before sending.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Parse the following resume and return a JSON object with this EXACT schema:
{
  "personalInfo": {
    "name": "Jane Doe",
    "email": "jane@example.com",
    "phone": "(555) 010-2000",
    "location": "Austin, TX",
    "linkedin": "linkedin.com/in/janedoe",
    "website": null
  },
  "summary": "Backend engineer with six years of experience...",
  "experience": [
    {
      "title": "Software Engineer",
      "company": "Acme Corp",
      "duration": "2021 - Present",
      "description": "Payments platform team",
      "achievements": ["Cut checkout latency by 30%"]
    }
  ],
  "education": [
    {"degree": "BSc Computer Science", "institution": "State University", "year": "2018", "gpa": null}
  ],
  "technicalSkills": ["python"],
  "softSkills": ["mentoring"],
  "certifications": [],
  "projects": [],
  "languages": [],
  "awards": []
}

Use null for unknown personalInfo fields and empty arrays for missing sections.

RESUME:
{resume_text}"#;
