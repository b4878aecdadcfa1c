//! Paragraph splitting for live documents at analysis time.

/// Paragraphs of this many characters or fewer are headers, page numbers, or
/// signature lines, and are not classified.
pub const MIN_PARAGRAPH_CHARS: usize = 50;

/// Split extracted page texts into whitespace-normalised paragraphs.
///
/// Paragraph breaks are blank lines (`"\n\n"`) within a page.
pub fn split_paragraphs<S: AsRef<str>>(pages: &[S]) -> Vec<String> {
    let mut out = Vec::new();
    for page in pages {
        for raw in page.as_ref().split("\n\n") {
            let paragraph = lexguard_core::normalize_whitespace(raw);
            if paragraph.chars().count() > MIN_PARAGRAPH_CHARS {
                out.push(paragraph);
            }
        }
    }
    out
}
