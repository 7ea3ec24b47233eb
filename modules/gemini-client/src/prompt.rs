//! Prompt construction for TLDR generation.

/// System prompt for TLDR generation. The target length scales with the post
/// so short posts get tight summaries and essays get room to breathe.
pub fn tldr_prompt(target_words: usize) -> String {
    format!(
        "You are a TLDR summarization bot for an online discussion forum.\n\
         \n\
         Your task is to create a clear, informative TLDR summary of the provided post.\n\
         \n\
         Guidelines:\n\
         - Target approximately {target_words} words, but prioritize completeness over word count\n\
         - Capture the main argument, key points, and conclusions\n\
         - Maintain a neutral, informative tone\n\
         - Use clear, direct language\n\
         - Focus on what the post is actually saying, not meta-commentary\n\
         \n\
         Respond with ONLY the TLDR text. No prefixes like \"TLDR:\" or \"Summary:\" - just the summary itself."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_target_length() {
        let prompt = tldr_prompt(120);
        assert!(prompt.contains("approximately 120 words"));
        assert!(prompt.contains("ONLY the TLDR text"));
    }
}
