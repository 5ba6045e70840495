// All LLM prompt constants for the resume analysis module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for ATS analysis. Append `JSON_ONLY_SYSTEM`.
pub const ANALYSIS_SYSTEM: &str = "You are an expert ATS (Applicant Tracking System) analyst \
    and career coach. You score resumes the way modern ATS parsers and recruiters do, and you \
    give specific, actionable feedback grounded in the resume text.";

/// ATS analysis prompt. Replace: {job_block}, {industry_block}, {job_match_rule}, {resume_text}.
/// `{resume_text}` is filled last so placeholders inside user text are left alone.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the resume below for ATS compatibility and overall quality.
{job_block}{industry_block}
Return a JSON object with this EXACT schema:
{
  "ats_score": 72,
  "job_match_score": 64,
  "skills_fit_score": 70,
  "matched_keywords": ["Python", "stakeholder management"],
  "missing_keywords": ["Kubernetes"],
  "strengths": ["Clear reverse-chronological structure"],
  "warnings": [
    {
      "category": "formatting",
      "severity": "high",
      "issue": "Skills are listed inside a table",
      "recommendation": "Move skills into a plain-text section; many ATS parsers skip tables"
    }
  ],
  "bullet_rewrites": [
    {
      "before": "Responsible for the deployment pipeline",
      "after": "Rebuilt the deployment pipeline, cutting release time from 2 days to [X] hours",
      "reason": "Leads with an action verb and a measurable outcome"
    }
  ],
  "summary": "Two or three sentences on overall readiness.",
  "coaching": [
    {"title": "Lead with impact", "source": "Recruiter screening practice", "insight": "Recruiters skim the first line of each bullet; put the result there."}
  ]
}

SCORING RULES:
- All scores are integers from 0 to 100.
- ats_score: parseability and structure (standard section headings, no tables/columns/images, consistent dates, contact details present), plus keyword presence.
- skills_fit_score: how well the demonstrated skills support the candidate's apparent target role.
- {job_match_rule}

WARNINGS: severity is one of "low", "medium", "high". Category is one of "formatting", "content", "keywords", "language", "metrics", "length".
BULLET REWRITES: pick the 3 to 5 weakest bullets. Quote "before" exactly as written.
COACHING: 2 to 4 insights, each with a short title, where the advice comes from, and the insight itself.

{no_fabrication}

RESUME:
{resume_text}"#;

pub const JOB_BLOCK_TEMPLATE: &str = "\nTARGET JOB DESCRIPTION:\n{job_description}\n";

pub const INDUSTRY_BLOCK_TEMPLATE: &str =
    "\nTARGET INDUSTRY: {industry}. Weigh industry-standard terminology, certifications and methodologies.\n";

pub const JOB_MATCH_RULE_WITH_JD: &str = "job_match_score: overlap between the resume and the job description's required skills, seniority and responsibilities. matched_keywords and missing_keywords refer to the job description.";

pub const JOB_MATCH_RULE_WITHOUT_JD: &str = "No job description was supplied: set job_match_score to null. matched_keywords and missing_keywords refer to keywords expected for the candidate's apparent target role.";

/// System prompt for bullet optimization. Append `JSON_ONLY_SYSTEM`.
pub const OPTIMIZE_SYSTEM: &str = "You are an expert resume writer. You rewrite resume bullets \
    into concise, achievement-focused statements that start with a strong action verb.";

/// Bullet optimization prompt. Replace: {job_block}, {no_fabrication}, {bullets_json}.
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"Rewrite each resume bullet below.
{job_block}
Return a JSON ARRAY with exactly one object per input bullet, in input order:
[
  {
    "before": "the original bullet, verbatim",
    "after": "the rewritten bullet",
    "reason": "one short sentence on what changed"
  }
]

RULES:
1. Start every rewrite with a strong past-tense action verb.
2. Keep each rewrite under 30 words.
3. Use the STAR method compactly: the action and the result matter most.
4. Incorporate job description keywords only where the original supports them.

{no_fabrication}

BULLETS:
{bullets_json}"#;
