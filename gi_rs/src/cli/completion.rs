//! Completion index remapping.
//!
//! Bash hands the helper the index of the word under the cursor (`cword`).
//! Reserved tokens vanish from the rewritten command line, so the cursor has
//! to move left once for every reserved token before it. A reserved token
//! *under* the cursor is gone entirely, which the caller learns through
//! `deleted`.
//!
//! When the word under the cursor is empty, bash does not pass it at all; the
//! helper re-inserts an empty line at the remapped position instead.

use crate::cli::parser::CompletionRequest;

/// Cursor bookkeeping while the expander walks the tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemapState {
    cword: usize,
    cword_empty: bool,
    shift: usize,
    deleted: bool,
}

impl RemapState {
    pub fn new(request: CompletionRequest) -> Self {
        Self {
            cword: request.cword,
            cword_empty: request.cword_empty,
            shift: 0,
            deleted: false,
        }
    }

    /// Record that the token at original `index` was dropped.
    pub fn exclude(&mut self, index: usize) {
        if index == self.cword {
            self.deleted = true;
        } else if index < self.cword {
            self.shift += 1;
        }
    }

    pub fn new_index(&self) -> usize {
        self.cword - self.shift
    }

    /// An empty cursor word has no original token, so it cannot be deleted.
    pub fn deleted(&self) -> bool {
        self.deleted && !self.cword_empty
    }

    /// Freeze the state against the final rewritten arguments.
    pub fn finish(self, words: Vec<String>) -> CompletionOutput {
        CompletionOutput {
            deleted: self.deleted(),
            new_index: self.new_index(),
            cword_empty: self.cword_empty,
            words,
        }
    }
}

/// What the completion helper prints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionOutput {
    pub deleted: bool,
    pub new_index: usize,
    pub cword_empty: bool,
    /// Rewritten arguments, tool path first.
    pub words: Vec<String>,
}

impl CompletionOutput {
    /// `deleted`, `new_index`, then one line per word, with an empty line at
    /// `new_index` for an empty cursor word.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.words.len() + 3);
        lines.push(self.deleted.to_string());
        lines.push(self.new_index.to_string());
        for (i, word) in self.words.iter().enumerate() {
            if self.cword_empty && i == self.new_index {
                lines.push(String::new());
            }
            lines.push(word.clone());
        }
        if self.cword_empty && self.new_index == self.words.len() {
            lines.push(String::new());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(cword: usize, cword_empty: bool) -> RemapState {
        RemapState::new(CompletionRequest { cword, cword_empty })
    }

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reserved_tokens_before_cursor_shift_it() {
        let mut remap = state(5, false);
        remap.exclude(1);
        remap.exclude(3);
        assert_eq!(remap.new_index(), 3);
        assert!(!remap.deleted());
    }

    #[test]
    fn test_reserved_tokens_after_cursor_do_not_shift() {
        let mut remap = state(2, false);
        remap.exclude(3);
        remap.exclude(7);
        assert_eq!(remap.new_index(), 2);
    }

    #[test]
    fn test_reserved_token_under_cursor_is_deleted() {
        let mut remap = state(2, false);
        remap.exclude(1);
        remap.exclude(2);
        assert!(remap.deleted());
        assert_eq!(remap.new_index(), 1);
    }

    #[test]
    fn test_empty_cursor_word_is_never_deleted() {
        let mut remap = state(2, true);
        remap.exclude(2);
        assert!(!remap.deleted());
    }

    #[test]
    fn test_lines_without_empty_word() {
        let mut remap = state(2, false);
        remap.exclude(1);
        let output = remap.finish(words(&["git", "comm"]));
        assert_eq!(output.lines(), words(&["false", "1", "git", "comm"]));
    }

    #[test]
    fn test_empty_word_inserted_inside() {
        let output = state(1, true).finish(words(&["git", "status"]));
        assert_eq!(output.lines(), words(&["false", "1", "git", "", "status"]));
    }

    #[test]
    fn test_empty_word_appended_at_end() {
        let mut remap = state(3, true);
        remap.exclude(1);
        let output = remap.finish(words(&["git", "commit"]));
        assert_eq!(output.lines(), words(&["false", "2", "git", "commit", ""]));
    }

    #[test]
    fn test_empty_word_beyond_end_is_not_inserted() {
        let output = state(9, true).finish(words(&["git"]));
        assert_eq!(output.lines(), words(&["false", "9", "git"]));
    }

    #[test]
    fn test_deleted_flag_is_printed() {
        let mut remap = state(1, false);
        remap.exclude(1);
        let output = remap.finish(words(&["git"]));
        assert_eq!(output.lines()[0], "true");
    }
}
