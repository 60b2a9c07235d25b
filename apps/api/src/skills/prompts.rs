//! Skill generation, validation and summary prompt templates.
//! Replace the `{placeholder}` tokens before sending.

/// Skill-list generation. Replace `{job_title}`.
pub const SKILL_GENERATION_PROMPT: &str = "\
Generate 6 to 10 relevant skill attributes for a \"{job_title}\".
Return ONLY a JSON array of skill-name strings — no markdown, no commentary.";

/// Skill-evidence validation. Replace `{skill_name}`, `{rating}`,
/// `{rating_label}`, `{proof}` and `{certifications}`.
/// The closing directive pins the response to one of three literals so a
/// plain trim is sufficient on the response side.
pub const SKILL_VALIDATION_PROMPT: &str = "\
Evaluate whether the claimed competence level for the skill below is supported \
by the evidence provided.

Skill: \"{skill_name}\" (self-rating: {rating} — {rating_label})
Proof points: \"{proof}\"
Certifications: {certifications}

Respond with ONLY one of: \"Strongly Supported\", \"Supported\", or \"Not Supported\".";

/// Proof-point summarization. Replace `{proof_points}`.
/// Target length is advisory; the response is free prose.
pub const SUMMARY_PROMPT: &str = "\
Write a 100-150 word professional summary based on the following proof points:

{proof_points}

Respond with the summary text only.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_prompt_substitutes_and_directs_output() {
        let prompt = SKILL_GENERATION_PROMPT.replace("{job_title}", "Accountant");
        assert!(prompt.contains("\"Accountant\""));
        assert!(!prompt.contains("{job_title}"));
        assert!(prompt.contains("JSON array"));
    }

    #[test]
    fn test_validation_prompt_ends_with_literal_directive() {
        assert!(SKILL_VALIDATION_PROMPT
            .trim_end()
            .ends_with("\"Strongly Supported\", \"Supported\", or \"Not Supported\"."));
    }

    #[test]
    fn test_summary_prompt_has_placeholder() {
        assert!(SUMMARY_PROMPT.contains("{proof_points}"));
    }
}
