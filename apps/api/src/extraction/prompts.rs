// Resume extraction prompt templates.
//
// Every extraction instruction must END with an explicit output-format
// directive (a raw JSON array) so the repair pass on the response side has a
// stable contract to recover.

pub const EMPLOYMENT_EXTRACTION_PROMPT: &str = "\
You are a data extraction engine. Analyze the attached resume and extract the \
full employment history.
Return ONLY a JSON array of objects with this structure:
[
  { \"company\": \"String\", \"jobTitle\": \"String\", \"startDate\": \"String\", \
\"endDate\": \"String\", \"city\": \"String\", \"description\": \"String (summary of duties)\" }
]
- All values are strings.
- If a position is ongoing, use \"Present\" as the endDate.
- DO NOT output markdown code blocks.
- Output strictly valid JSON: your response MUST be only the raw JSON array.";

pub const EDUCATION_EXTRACTION_PROMPT: &str = "\
Analyze the attached resume document and extract the Education, Degrees, \
Diplomas, and Certifications.
Return the data as a valid JSON array of objects.
Keys: \"name\", \"institute\", \"location\", \"year\" — all string values.
IMPORTANT: Your response MUST be only the raw JSON array.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_end_with_output_directive() {
        for prompt in [EMPLOYMENT_EXTRACTION_PROMPT, EDUCATION_EXTRACTION_PROMPT] {
            assert!(prompt.trim_end().ends_with("raw JSON array."));
        }
    }

    #[test]
    fn test_employment_prompt_names_every_field() {
        for key in ["company", "jobTitle", "startDate", "endDate", "city", "description"] {
            assert!(EMPLOYMENT_EXTRACTION_PROMPT.contains(key));
        }
    }
}
