// LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for resume synthesis. Free text, not JSON.
pub const SYNTHESIS_SYSTEM: &str = "You are an expert resume writer and ATS optimization \
    specialist. You rewrite resumes so that they match a target job posting while keeping \
    a natural, professional tone.";

/// Resume synthesis prompt template.
/// Replace: {plain_text_instruction}, {resume_json}, {job_json}
pub const SYNTHESIS_PROMPT_TEMPLATE: &str = r#"Rewrite the candidate's resume so that it matches the target job.

CANDIDATE PROFILE (JSON):
{resume_json}

TARGET JOB REQUIREMENTS (JSON):
{job_json}

Produce the resume with these sections, in this order:
1. Header: the candidate's name on the first line, then a contact line
2. PROFESSIONAL SUMMARY
3. TECHNICAL SKILLS (grouped by category)
4. PROFESSIONAL EXPERIENCE (each role: title, company | dates, then bullet points starting with "• ")
5. EDUCATION
6. CERTIFICATIONS
7. PROJECTS (optional)

Guidelines:
- Incorporate the job's technical skills and responsibilities naturally where the profile supports them
- Quantify achievements where possible
- Use varied, natural sentence structure and strong action verbs
- Keep chronology consistent

{plain_text_instruction}"#;

/// Used in place of the profile JSON when only job requirements were supplied.
pub const NO_PROFILE_PLACEHOLDER: &str =
    "No candidate profile was supplied. Write a representative profile for this role.";
