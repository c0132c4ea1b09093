//! Prompt templates for the interview analysis flow

/// Templates for the two LLM requests.
///
/// Both templates demand a single JSON object reply with exact key
/// names; the normalizer downstream tolerates code fences and
/// surrounding prose, but the required keys are non-negotiable.
pub struct InterviewPromptTemplate;

impl InterviewPromptTemplate {
    /// Prompt for generating the next interview question.
    ///
    /// Parameter order is fixed: previous question, candidate response,
    /// resume highlights, job description.
    pub fn next_question(
        previous_question: &str,
        candidate_response: &str,
        resume_highlights: &str,
        job_description: &str,
    ) -> String {
        format!(
            r#"You are an experienced technical interviewer conducting a live interview.

Previous question:
{previous_question}

Candidate's response:
{candidate_response}

Candidate's resume highlights:
{resume_highlights}

Job description:
{job_description}

Based on the candidate's response and background, ask the single most
revealing follow-up question. Probe depth where the answer was strong
and gaps where it was vague. Stay relevant to the job description.

Respond with ONLY a JSON object in exactly this format:
{{"next_question": "<your follow-up question>"}}"#
        )
    }

    /// Prompt for scoring a candidate response.
    ///
    /// Parameter order is fixed: question, candidate response, job
    /// description, resume highlights.
    pub fn feedback(
        question: &str,
        candidate_response: &str,
        job_description: &str,
        resume_highlights: &str,
    ) -> String {
        format!(
            r#"You are an experienced technical interviewer evaluating a candidate's answer.

Question asked:
{question}

Candidate's response:
{candidate_response}

Job description:
{job_description}

Candidate's resume highlights:
{resume_highlights}

Evaluate the response for technical accuracy, depth, clarity, and
relevance to the role. Be fair but specific: name concrete strengths
and concrete gaps.

Respond with ONLY a JSON object in exactly this format:
{{"feedback": "<2-4 sentences of evaluation>", "score": <number from 0 to 10>}}"#
        )
    }
}
