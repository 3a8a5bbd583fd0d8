//! Pattern matching over text, indexed by `char`.

use super::{Advance, Outbox, Steps};
use crate::step::{Highlights, Step, Tag, TextMatchSnapshot};

struct Strings {
    text: String,
    pattern: String,
    text_chars: Vec<char>,
    pattern_chars: Vec<char>,
}

impl Strings {
    fn new(text: &str, pattern: &str) -> Self {
        Self {
            text: text.to_string(),
            pattern: pattern.to_string(),
            text_chars: text.chars().collect(),
            pattern_chars: pattern.chars().collect(),
        }
    }

    fn n(&self) -> usize {
        self.text_chars.len()
    }

    fn m(&self) -> usize {
        self.pattern_chars.len()
    }

    fn frame(
        &self,
        text_highlights: Highlights,
        pattern_highlights: Highlights,
        pattern_offset: usize,
        message: String,
    ) -> Step {
        Step::Text(TextMatchSnapshot {
            text: self.text.clone(),
            pattern: self.pattern.clone(),
            text_highlights,
            pattern_highlights,
            pattern_offset,
            message,
        })
    }

    /// Aligned highlights: the first `matched` characters as `Match`, then `tail` at `matched`.
    fn aligned(&self, offset: usize, matched: usize, tail: Tag) -> (Highlights, Highlights) {
        let mut text: Highlights = (0..matched).map(|k| (offset + k, Tag::Match)).collect();
        let mut pattern: Highlights = (0..matched).map(|k| (k, Tag::Match)).collect();
        if matched < self.m() && offset + matched < self.n() {
            text.insert(offset + matched, tail);
            pattern.insert(matched, tail);
        }
        (text, pattern)
    }

    fn found(&self, offset: usize) -> Step {
        self.frame(
            (offset..offset + self.m()).map(|i| (i, Tag::Found)).collect(),
            Highlights::new(),
            offset,
            format!("Pattern found at index {offset}."),
        )
    }

    fn not_found(&self) -> Step {
        self.frame(
            Highlights::new(),
            Highlights::new(),
            0,
            "Pattern not found.".to_string(),
        )
    }

    /// Whether the pattern still fits when aligned at `offset`.
    fn fits_at(&self, offset: usize) -> bool {
        offset + self.m() <= self.n()
    }
}

/// Brute-force matching: try every alignment, compare left to right.
pub struct NaiveSearch {
    strings: Strings,
    offset: usize,
    j: usize,
}

pub fn naive_search(text: &str, pattern: &str) -> Steps<NaiveSearch> {
    Steps::new(NaiveSearch {
        strings: Strings::new(text, pattern),
        offset: 0,
        j: 0,
    })
}

impl Advance for NaiveSearch {
    fn advance(&mut self, out: &mut Outbox) -> bool {
        let s = &self.strings;
        if !s.fits_at(self.offset) {
            out.push_back(s.not_found());
            return false;
        }
        if self.j == s.m() {
            out.push_back(s.found(self.offset));
            return false;
        }

        let (offset, j) = (self.offset, self.j);
        let (t, p) = (s.text_chars[offset + j], s.pattern_chars[j]);
        let (text, pattern) = s.aligned(offset, j, Tag::Compare);
        out.push_back(s.frame(
            text,
            pattern,
            offset,
            format!("Comparing text[{}] '{t}' with pattern[{j}] '{p}'.", offset + j),
        ));

        if t == p {
            self.j += 1;
        } else {
            let (text, pattern) = s.aligned(offset, j, Tag::Mismatch);
            out.push_back(s.frame(
                text,
                pattern,
                offset,
                format!("Mismatch at index {}. Shifting pattern by one.", offset + j),
            ));
            self.offset += 1;
            self.j = 0;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KmpPhase {
    Prefix { i: usize, len: usize },
    Scan { i: usize, q: usize },
}

/// Knuth-Morris-Pratt: build the longest-proper-prefix table, then scan without
/// ever moving backwards in the text.
pub struct KmpSearch {
    strings: Strings,
    lps: Vec<usize>,
    phase: KmpPhase,
}

pub fn kmp_search(text: &str, pattern: &str) -> Steps<KmpSearch> {
    let strings = Strings::new(text, pattern);
    let lps = vec![0; strings.m()];
    Steps::new(KmpSearch {
        strings,
        lps,
        phase: KmpPhase::Prefix { i: 1, len: 0 },
    })
}

impl KmpSearch {
    fn prefix(&mut self, i: usize, len: usize, out: &mut Outbox) {
        let s = &self.strings;
        if i >= s.m() {
            out.push_back(s.frame(
                Highlights::new(),
                Highlights::new(),
                0,
                format!("Prefix table built: {:?}.", self.lps),
            ));
            self.phase = KmpPhase::Scan { i: 0, q: 0 };
            return;
        }

        let (a, b) = (s.pattern_chars[i], s.pattern_chars[len]);
        let marks: Highlights = [(len, Tag::Compare), (i, Tag::Compare)].into_iter().collect();
        out.push_back(s.frame(
            Highlights::new(),
            marks,
            0,
            format!("Prefix table: comparing pattern[{i}] '{a}' with pattern[{len}] '{b}'."),
        ));

        self.phase = if a == b {
            self.lps[i] = len + 1;
            KmpPhase::Prefix { i: i + 1, len: len + 1 }
        } else if len > 0 {
            KmpPhase::Prefix {
                i,
                len: self.lps[len - 1],
            }
        } else {
            KmpPhase::Prefix { i: i + 1, len: 0 }
        };
    }

    fn scan(&mut self, i: usize, q: usize, out: &mut Outbox) -> bool {
        let s = &self.strings;
        let offset = i - q;
        if q == s.m() {
            out.push_back(s.found(offset));
            return false;
        }
        if !s.fits_at(offset) {
            out.push_back(s.not_found());
            return false;
        }

        let (t, p) = (s.text_chars[i], s.pattern_chars[q]);
        let (text, pattern) = s.aligned(offset, q, Tag::Compare);
        out.push_back(s.frame(
            text,
            pattern,
            offset,
            format!("Comparing text[{i}] '{t}' with pattern[{q}] '{p}'."),
        ));

        if t == p {
            self.phase = KmpPhase::Scan { i: i + 1, q: q + 1 };
            return true;
        }

        let (text, pattern) = s.aligned(offset, q, Tag::Mismatch);
        let (next, message) = if q > 0 {
            let fallback = self.lps[q - 1];
            (
                KmpPhase::Scan { i, q: fallback },
                format!("Mismatch at index {i}. Falling back to prefix length {fallback}."),
            )
        } else {
            (
                KmpPhase::Scan { i: i + 1, q: 0 },
                format!("Mismatch at index {i}. Advancing in the text."),
            )
        };
        out.push_back(s.frame(text, pattern, offset, message));
        self.phase = next;
        true
    }
}

impl Advance for KmpSearch {
    fn advance(&mut self, out: &mut Outbox) -> bool {
        match self.phase {
            KmpPhase::Prefix { i, len } => {
                self.prefix(i, len, out);
                true
            }
            KmpPhase::Scan { i, q } => self.scan(i, q, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last_text<I: Iterator<Item = Step>>(steps: I) -> TextMatchSnapshot {
        steps.last().unwrap().as_text().unwrap().clone()
    }

    #[test]
    fn naive_finds_first_abra_at_six() {
        let last = last_text(naive_search("ABACADABRACADABRA", "ABRA"));
        assert_eq!(last.message, "Pattern found at index 6.");
        assert_eq!(last.pattern_offset, 6);
        let found: Vec<usize> = last.text_highlights.keys().copied().collect();
        assert_eq!(found, vec![6, 7, 8, 9]);
        assert!(last.text_highlights.values().all(|t| *t == Tag::Found));
        assert!(last.pattern_highlights.is_empty());
    }

    #[test]
    fn kmp_finds_first_abra_at_six() {
        let last = last_text(kmp_search("ABACADABRACADABRA", "ABRA"));
        assert_eq!(last.message, "Pattern found at index 6.");
        assert_eq!(last.pattern_offset, 6);
    }

    #[test]
    fn absent_pattern_ends_with_offset_zero() {
        for last in [
            last_text(naive_search("AAAB", "ABA")),
            last_text(kmp_search("AAAB", "ABA")),
        ] {
            assert_eq!(last.message, "Pattern not found.");
            assert_eq!(last.pattern_offset, 0);
        }
    }

    #[test]
    fn pattern_longer_than_text() {
        let steps: Vec<Step> = naive_search("AB", "ABC").collect();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].message(), "Pattern not found.");
    }

    #[test]
    fn naive_compare_frames_keep_earlier_matches() {
        let steps: Vec<Step> = naive_search("ABC", "ABC").collect();
        let third = steps[2].as_text().unwrap();
        assert_eq!(third.text_highlights.get(&0), Some(&Tag::Match));
        assert_eq!(third.text_highlights.get(&1), Some(&Tag::Match));
        assert_eq!(third.text_highlights.get(&2), Some(&Tag::Compare));
        assert_eq!(third.pattern_highlights.get(&2), Some(&Tag::Compare));
    }

    #[test]
    fn naive_mismatch_shifts_by_one() {
        let steps: Vec<Step> = naive_search("XA", "A").collect();
        let mismatch = steps[1].as_text().unwrap();
        assert_eq!(mismatch.text_highlights.get(&0), Some(&Tag::Mismatch));
        assert_eq!(steps.last().unwrap().as_text().unwrap().pattern_offset, 1);
    }

    #[test]
    fn kmp_builds_prefix_table() {
        let mut search = kmp_search("AAAB", "AABA");
        let built = search
            .by_ref()
            .find(|s| s.message().starts_with("Prefix table built"))
            .unwrap();
        assert_eq!(built.message(), "Prefix table built: [0, 1, 0, 1].");
    }

    #[test]
    fn kmp_scan_offsets_stay_in_bounds() {
        let text = "ABABABCABABABCABABC";
        for step in kmp_search(text, "ABABC") {
            let s = step.as_text().unwrap();
            assert!(s.pattern_offset <= text.len());
            assert!(s.text_highlights.keys().all(|&i| i < text.len()));
        }
    }

    #[test]
    fn multibyte_text_is_indexed_by_char() {
        let last = last_text(naive_search("héllo", "llo"));
        assert_eq!(last.pattern_offset, 2);
    }
}
