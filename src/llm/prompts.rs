/// Instruction placed in front of every submitted text.
pub const SUMMARY_INSTRUCTION: &str = "Summarize this text in 3-5 bullets:\n\n";

/// Build the summary prompt for a submitted text.
///
/// The text is appended exactly as received, surrounding whitespace included.
pub fn build_summary_prompt(text: &str) -> String {
    format!("{SUMMARY_INSTRUCTION}{text}")
}
