use std::iter::FusedIterator;
use std::str::SplitWhitespace;

pub const DEFAULT_CHUNK_WORDS: usize = 3000;

/// Word chunks of a text, each holding at most `max_len` whitespace
/// delimited tokens re-joined with single spaces.
///
/// Nothing is split until iteration starts, and every call to [`Chunks::iter`]
/// starts over from the first word.
#[derive(Debug, Clone, Copy)]
pub struct Chunks<'a> {
    text: &'a str,
    max_len: usize,
}

/// Splits `text` into chunks of at most `max_len` words. A `max_len` of zero
/// is treated as one.
pub fn chunk_text(text: &str, max_len: usize) -> Chunks<'_> {
    Chunks {
        text,
        max_len: max_len.max(1),
    }
}

impl<'a> Chunks<'a> {
    pub fn iter(&self) -> ChunkIter<'a> {
        ChunkIter {
            words: self.text.split_whitespace(),
            max_len: self.max_len,
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl<'a> IntoIterator for Chunks<'a> {
    type Item = String;
    type IntoIter = ChunkIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &Chunks<'a> {
    type Item = String;
    type IntoIter = ChunkIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct ChunkIter<'a> {
    words: SplitWhitespace<'a>,
    max_len: usize,
}

impl Iterator for ChunkIter<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut chunk = String::new();
        for word in self.words.by_ref().take(self.max_len) {
            if !chunk.is_empty() {
                chunk.push(' ');
            }
            chunk.push_str(word);
        }
        if chunk.is_empty() {
            None
        } else {
            Some(chunk)
        }
    }
}

impl FusedIterator for ChunkIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_blank_text_has_no_chunks() {
        assert_eq!(chunk_text("", 3000).iter().count(), 0);
        assert_eq!(chunk_text(" \n\t ", 3).iter().count(), 0);
    }

    #[test]
    fn groups_words_up_to_max_len() {
        let chunks: Vec<String> = chunk_text("a b c d e", 2).into_iter().collect();
        assert_eq!(chunks, vec!["a b", "c d", "e"]);
    }

    #[test]
    fn rejoining_reconstructs_normalized_tokens() {
        let text = "  Large\tlanguage models\n\nin   healthcare: a survey of\r\nrecent work ";
        let chunks = chunk_text(text, 3);
        for chunk in &chunks {
            assert!(chunk.split(' ').count() <= 3);
        }
        let rejoined = chunks.iter().collect::<Vec<_>>().join(" ");
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(rejoined, normalized);
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks: Vec<String> = chunk_text("one two three", DEFAULT_CHUNK_WORDS)
            .into_iter()
            .collect();
        assert_eq!(chunks, vec!["one two three"]);
    }

    #[test]
    fn iteration_restarts_from_the_beginning() {
        let chunks = chunk_text("w1 w2 w3 w4 w5", 2);
        let first: Vec<String> = chunks.iter().collect();
        let second: Vec<String> = chunks.iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn zero_max_len_means_one_word_per_chunk() {
        let chunks = chunk_text("x y", 0);
        assert_eq!(chunks.max_len(), 1);
        assert_eq!(chunks.iter().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn exhausted_iterator_stays_exhausted() {
        let mut iter = chunk_text("only", 5).iter();
        assert_eq!(iter.next().as_deref(), Some("only"));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }
}
