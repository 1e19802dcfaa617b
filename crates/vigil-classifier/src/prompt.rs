//! LLM prompt for batch classification

/// Builds the classification prompt for one batch of comments
pub struct PromptBuilder<'a> {
    comments: &'a [&'a str],
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder over the comments to send
    pub fn new(comments: &'a [&'a str]) -> Self {
        Self { comments }
    }

    /// Build the complete classification prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Task
        prompt.push_str(CLASSIFICATION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. The comments, numbered from 1
        prompt.push_str("Comments:\n");
        for (i, comment) in self.comments.iter().enumerate() {
            // Keep one comment per line so the numbering stays unambiguous
            let single_line = comment.replace(['\r', '\n'], " ");
            prompt.push_str(&format!("{}. '{}'\n", i + 1, single_line));
        }
        prompt.push('\n');

        // 3. Output schema
        prompt.push_str(OUTPUT_SCHEMA);
        prompt.push_str("\n\n");
        prompt.push_str(&format!(
            "Return the results as a JSON array of objects, one for each comment in the same order \
             ({} objects). Return ONLY the JSON array, no additional text.\n",
            self.comments.len()
        ));

        prompt
    }
}

const CLASSIFICATION_INSTRUCTIONS: &str = "Analyze the following comments for offensive content. \
For each comment, classify it into one of these categories: hate speech, toxicity, profanity, harassment.";

const OUTPUT_SCHEMA: &str = r#"For each comment, provide a JSON object with these fields:
- is_offensive (boolean)
- offense_type (string, must be one of: hate speech, toxicity, profanity, harassment, or none)
- explanation (string)
- severity (float between 0 and 1, where 1 is most severe)"#;
