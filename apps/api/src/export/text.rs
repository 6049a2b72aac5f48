//! Plain-text helpers shared by the downloads.

pub const PLAN_FILE_NAME: &str = "execution_plan.txt";
pub const REPORT_FILE_NAME: &str = "roast_report.pdf";

/// Characters markdown uses for emphasis, inline code and headings.
const EMPHASIS_CHARS: [char; 4] = ['*', '_', '`', '#'];

/// Removes emphasis markup so text can go into a format without rich text.
///
/// Each line is trimmed afterwards, so a removed heading marker leaves no indent.
pub fn strip_emphasis(text: &str) -> String {
    text.lines()
        .map(|line| {
            let cleaned: String = line.chars().filter(|c| !EMPHASIS_CHARS.contains(c)).collect();
            cleaned.trim().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `Content-Disposition` value for a download named `file_name`.
pub fn attachment(file_name: &str) -> String {
    format!("attachment; filename=\"{file_name}\"")
}
