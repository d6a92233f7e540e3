use crate::models::generation::JobDetails;

pub fn cover_letter(job: &JobDetails, resume_text: &str) -> String {
    format!(
        r#"You are a professional career advisor. Write a compelling and concise cover letter for the following job application.
The cover letter should be tailored to the specific job description and highlight relevant skills and experiences from the applicant's resume.
The tone should be professional and enthusiastic. Address it to "Hiring Manager" if no specific contact is available.
Focus on 2-3 key alignments between the resume and the job description.
Keep the cover letter to 3-4 paragraphs.
Do not include any placeholder like "[Your Name]" or "[Your Contact Information]".
Start directly with the salutation (e.g., "Dear Hiring Manager,"). End directly before any closing like "Sincerely,".

Applicant's Resume:
--- APPLICANT RESUME ---
{resume_text}
--- END APPLICANT RESUME ---

Job Description:
--- JOB DESCRIPTION ---
Job Title: {title}
Company: {company}
Description: {description}
--- END JOB DESCRIPTION ---

Generate only the cover letter text."#,
        title = job.title,
        company = job.company,
        description = job.description,
    )
}

pub fn interview_questions(job: &JobDetails, resume_text: &str) -> String {
    format!(
        r#"You are an interview preparation assistant. Based on the provided job description and applicant's resume, generate a list of 5-7 potential interview questions.
These questions should help the applicant prepare for an interview for this specific role.
Include a mix of:
1. Behavioral questions ("Tell me about a time...").
2. Situational questions ("How would you handle X...?").
3. Technical questions relevant to skills in the job description and resume.
4. Questions about specific projects or experiences from the resume that align with the job.

Applicant's Resume:
---
{resume_text}
---

Job Description:
---
Job Title: {title}
Company: {company}
Description: {description}
---

Format the output as a numbered list. Each question should be on a new line.
Example:
1. Can you describe a challenging project from your resume and how it relates to our needs for this role?"#,
        title = job.title,
        company = job.company,
        description = job.description,
    )
}

pub fn resume_keywords(resume_text: &str) -> String {
    format!(
        r#"Analyze the following resume text. Your goal is to extract information to help pre-fill a job search form.
Provide the output as a JSON object with the following keys: "jobTitleKeywords", "skills", and "location".

1. "jobTitleKeywords": Extract 1-3 potential job titles or primary role keywords from the resume.
   If multiple, separate them with a comma. If none are clear, leave this as an empty string.
   Examples: "Software Engineer, Full Stack Developer", "Product Manager", "Data Analyst"

2. "skills": Extract relevant technical skills, tools, and methodologies. Return as a comma-separated string.
   Examples: "Python, React, AWS, Docker, Agile, Scrum, Jira"

3. "location": Infer a primary location (city, state or country) if mentioned. If "remote" is strongly implied or stated, use "Remote".
   If no specific location is found, default to "{default_location}". Do not guess if not explicitly mentioned besides the default.

Resume Text:
---
{resume_text}
---

Return ONLY the JSON object. Do not include any other text, explanations, or markdown formatting.
Example of a valid JSON output:
{{
  "jobTitleKeywords": "Senior Software Engineer, Backend Developer",
  "skills": "Java, Spring Boot, Python, Microservices, Kubernetes, SQL",
  "location": "Bengaluru, India"
}}
Another example:
{{
  "jobTitleKeywords": "UX Designer",
  "skills": "Figma, Adobe XD, User Research, Prototyping",
  "location": "Remote"
}}"#,
        default_location = super::DEFAULT_LOCATION,
    )
}
