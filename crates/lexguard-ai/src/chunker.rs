//! Fixed-size, fixed-overlap character windows over a document.
//!
//! Windows start at 0 and advance by `chunk_size - overlap` while the start
//! is inside the text; the last windows are clipped to the text length.
//! Windows shorter than `min_chunk_length` are skipped, which loses at most
//! a short tail that the previous window already covered in part.

use lexguard_core::{Category, ChunkConfig};

/// A window of document text. Offsets are in characters, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
    /// Safe until the labeler assigns it.
    pub category: Category,
}

impl Chunk<'_> {
    pub fn char_len(&self) -> usize {
        self.end - self.start
    }
}

/// Lazy iterator over the windows of one text.
///
/// Deterministic: calling [`chunks`] again on the same text and config
/// yields the same sequence.
pub struct Chunks<'a> {
    text: &'a str,
    /// Byte offset of every character boundary, plus `text.len()`.
    boundaries: Vec<usize>,
    config: ChunkConfig,
    next_start: usize,
}

/// Slide a window over `text` according to `config`.
pub fn chunks<'a>(text: &'a str, config: &ChunkConfig) -> Chunks<'a> {
    let boundaries = text
        .char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(text.len()))
        .collect();
    Chunks {
        text,
        boundaries,
        config: *config,
        next_start: 0,
    }
}

impl Chunks<'_> {
    fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let len = self.char_len();
        while self.next_start < len {
            let start = self.next_start;
            let end = (start + self.config.chunk_size()).min(len);
            self.next_start += self.config.stride();

            if end - start < self.config.min_chunk_length() {
                continue;
            }

            let text = &self.text[self.boundaries[start]..self.boundaries[end]];
            return Some(Chunk {
                start,
                end,
                text,
                category: Category::Safe,
            });
        }
        None
    }
}
