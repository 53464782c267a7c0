use crate::core::DailyNoteRecord;

/// System instructions sent with every summarization request
pub(crate) const SUMMARY_INSTRUCTIONS: &str = "\
You are an assistant that writes a weekly review from a person's daily notes. \
The notes are given in chronological order, each under a heading with its date. \
Write a concise Markdown summary of the week: the main events and accomplishments, \
decisions that were made, open tasks and follow-ups, and any recurring themes. \
Use short headings and bullet points. Do not invent anything that is not in the notes.";

/// Join the daily notes, oldest first, into the user message.
pub(crate) fn build_user_content(records: &[DailyNoteRecord]) -> String {
    records
        .iter()
        .map(|r| format!("## {}\n\n{}", r.date, r.content.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
