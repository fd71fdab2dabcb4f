//! Hostmask pattern matching implementation.
//!
//! This module compiles a user-supplied wildcard hostmask into a structured
//! sequence of segments and matches candidate peer addresses against it.
//!
//! # Hostmask Syntax
//!
//! - `*` - Matches zero or more of any character (greedy)
//! - `?` - Matches exactly one of any character
//!
//! Every other character is literal, including characters that carry meaning
//! in general-purpose pattern dialects (`[`, `\`, `.`, and so on). As a
//! consequence compilation is total: any input string compiles to some
//! pattern, so [`HostmaskPattern::compile`] returns `Self` rather than a
//! `Result`.
//!
//! Matching is case-sensitive. Peer addresses are compared verbatim; callers
//! wanting case-insensitive comparison must normalize before matching.
//!
//! # Examples
//!
//! ```
//! use irc_addressbook::hostmask::HostmaskPattern;
//!
//! let pattern = HostmaskPattern::compile("*!*@*.example.com");
//! assert!(pattern.matches("nick!user@host.example.com"));
//! assert!(!pattern.matches("nick!user@host.other.net"));
//!
//! // `?` matches exactly one character
//! let pattern = HostmaskPattern::compile("a?c");
//! assert!(pattern.matches("abc"));
//! assert!(!pattern.matches("ac"));
//! assert!(!pattern.matches("abbc"));
//! ```

use std::fmt;

/// A segment of a compiled hostmask pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Literal text segment (no wildcards)
    Literal(String),

    /// `*` - matches zero or more of any character
    Star,

    /// `?` - matches exactly one character
    Question,
}

/// A compiled hostmask pattern.
///
/// Compilation happens once per distinct pattern string; evaluation via
/// [`matches`](Self::matches) is cheap by comparison and can be repeated
/// freely. The compiled form keeps the original pattern string around for
/// display and recompilation checks.
#[derive(Debug, Clone)]
pub struct HostmaskPattern {
    /// Original pattern string
    pattern: String,
    /// Compiled segments
    segments: Vec<Segment>,
}

impl HostmaskPattern {
    /// Compiles a hostmask pattern from a string.
    ///
    /// Never fails: wildcard metacharacters are `*` and `?`, and everything
    /// else is taken literally, so the worst case for any input is a pattern
    /// that only matches itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use irc_addressbook::hostmask::HostmaskPattern;
    ///
    /// let pattern = HostmaskPattern::compile("*!*@irc.example.com");
    /// assert!(pattern.matches("somebody!ident@irc.example.com"));
    /// ```
    pub fn compile(pattern: &str) -> Self {
        let segments = Self::parse(pattern);
        Self {
            pattern: pattern.to_string(),
            segments,
        }
    }

    /// Returns the original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Checks if the pattern matches the given candidate string.
    ///
    /// An empty candidate matches only an empty pattern or a pattern
    /// consisting solely of `*` wildcards.
    ///
    /// # Examples
    ///
    /// ```
    /// use irc_addressbook::hostmask::HostmaskPattern;
    ///
    /// let pattern = HostmaskPattern::compile("*");
    /// assert!(pattern.matches("anything at all"));
    /// assert!(pattern.matches(""));
    /// ```
    pub fn matches(&self, candidate: &str) -> bool {
        // Limit backtracking steps to bound work on pathological patterns
        // like *a*b*c*d*e* against long non-matching input
        let mut steps_remaining = 100_000;
        self.matches_impl(candidate, 0, 0, &mut steps_remaining)
    }

    /// Recursive backtracking matcher.
    ///
    /// # Arguments
    ///
    /// * `text` - The candidate to match against
    /// * `text_pos` - Current position in the text (byte offset)
    /// * `seg_idx` - Current segment index in the pattern
    /// * `steps_remaining` - Mutable counter to limit backtracking steps
    fn matches_impl(
        &self,
        text: &str,
        text_pos: usize,
        seg_idx: usize,
        steps_remaining: &mut usize,
    ) -> bool {
        if *steps_remaining == 0 {
            return false; // Exceeded step limit, treat as no match
        }
        *steps_remaining -= 1;

        // If we've consumed all segments, we match if we've also consumed all text
        if seg_idx >= self.segments.len() {
            return text_pos >= text.len();
        }

        match &self.segments[seg_idx] {
            Segment::Literal(lit) => {
                let remaining = &text[text_pos..];
                if remaining.starts_with(lit.as_str()) {
                    self.matches_impl(text, text_pos + lit.len(), seg_idx + 1, steps_remaining)
                } else {
                    false
                }
            }

            Segment::Question => {
                // Match exactly one character
                if let Some(ch) = text[text_pos..].chars().next() {
                    self.matches_impl(text, text_pos + ch.len_utf8(), seg_idx + 1, steps_remaining)
                } else {
                    false
                }
            }

            Segment::Star => {
                // Star at the end matches everything remaining
                if seg_idx + 1 >= self.segments.len() {
                    return true;
                }

                // Try matching star with 0, 1, 2, ... characters, advancing
                // by char boundaries to avoid slicing mid-UTF-8
                let mut pos = text_pos;
                loop {
                    if self.matches_impl(text, pos, seg_idx + 1, steps_remaining) {
                        return true;
                    }

                    if pos >= text.len() {
                        break;
                    }
                    if let Some(ch) = text[pos..].chars().next() {
                        pos += ch.len_utf8();
                    } else {
                        break;
                    }
                }
                false
            }
        }
    }

    /// Parses a hostmask string into segments.
    fn parse(pattern: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();

        let flush_literal = |buf: &mut String, segs: &mut Vec<Segment>| {
            if !buf.is_empty() {
                segs.push(Segment::Literal(std::mem::take(buf)));
            }
        };

        for ch in pattern.chars() {
            match ch {
                '*' => {
                    flush_literal(&mut literal_buf, &mut segments);
                    // Collapse runs of stars; "**" matches the same set as "*"
                    if segments.last() != Some(&Segment::Star) {
                        segments.push(Segment::Star);
                    }
                }

                '?' => {
                    flush_literal(&mut literal_buf, &mut segments);
                    segments.push(Segment::Question);
                }

                _ => {
                    literal_buf.push(ch);
                }
            }
        }

        flush_literal(&mut literal_buf, &mut segments);

        segments
    }
}

impl fmt::Display for HostmaskPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let pattern = HostmaskPattern::compile("nick!user@host");
        assert!(pattern.matches("nick!user@host"));
        assert!(!pattern.matches("nick!user@host.example.com"));
        assert!(!pattern.matches("Nick!user@host"));
        assert!(!pattern.matches(""));
    }

    #[test]
    fn test_match_all() {
        let pattern = HostmaskPattern::compile("*");
        assert!(pattern.matches(""));
        assert!(pattern.matches("x"));
        assert!(pattern.matches("nick!user@host.example.com"));
    }

    #[test]
    fn test_empty_pattern() {
        let pattern = HostmaskPattern::compile("");
        assert!(pattern.matches(""));
        assert!(!pattern.matches("nick"));
    }

    #[test]
    fn test_star_suffix() {
        let pattern = HostmaskPattern::compile("*!*@*.example.com");
        assert!(pattern.matches("nick!user@host.example.com"));
        assert!(pattern.matches("a!b@c.d.example.com"));
        assert!(!pattern.matches("nick!user@host.other.net"));
        assert!(!pattern.matches("nick!user@example.com"));
    }

    #[test]
    fn test_star_middle() {
        let pattern = HostmaskPattern::compile("nick!*@host");
        assert!(pattern.matches("nick!@host"));
        assert!(pattern.matches("nick!anyident@host"));
        assert!(!pattern.matches("other!ident@host"));
    }

    #[test]
    fn test_multiple_stars() {
        let pattern = HostmaskPattern::compile("*evil*");
        assert!(pattern.matches("evil"));
        assert!(pattern.matches("most evil peer"));
        assert!(!pattern.matches("good"));
    }

    #[test]
    fn test_question_mark() {
        let pattern = HostmaskPattern::compile("a?c");
        assert!(pattern.matches("abc"));
        assert!(pattern.matches("a?c"));
        assert!(!pattern.matches("ac"));
        assert!(!pattern.matches("abbc"));
    }

    #[test]
    fn test_question_not_matched_by_empty() {
        let pattern = HostmaskPattern::compile("?");
        assert!(pattern.matches("x"));
        assert!(!pattern.matches(""));
        assert!(!pattern.matches("xy"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        // No character classes, escapes, or regex syntax: all literal
        let pattern = HostmaskPattern::compile(r"nick[0-9]!\user@host.example.com");
        assert!(pattern.matches(r"nick[0-9]!\user@host.example.com"));
        assert!(!pattern.matches("nick5!user@host.example.com"));

        let pattern = HostmaskPattern::compile("a.c");
        assert!(pattern.matches("a.c"));
        assert!(!pattern.matches("abc"));
    }

    #[test]
    fn test_case_sensitive() {
        let pattern = HostmaskPattern::compile("*@HOST.example.com");
        assert!(pattern.matches("nick!user@HOST.example.com"));
        assert!(!pattern.matches("nick!user@host.example.com"));
    }

    #[test]
    fn test_consecutive_stars_collapse() {
        let pattern = HostmaskPattern::compile("**!**@**");
        assert!(pattern.matches("!@"));
        assert!(pattern.matches("nick!user@host"));
        assert!(!pattern.matches("no separators here"));
    }

    #[test]
    fn test_utf8_candidates() {
        let pattern = HostmaskPattern::compile("ñ?ck!*@*");
        assert!(pattern.matches("ñíck!user@host"));
        assert!(!pattern.matches("nick!user@host"));
    }

    #[test]
    fn test_pathological_pattern_terminates() {
        let pattern = HostmaskPattern::compile("*a*a*a*a*a*a*a*a*a*a*b");
        let text = "a".repeat(200);
        assert!(!pattern.matches(&text));
    }

    #[test]
    fn test_display_round_trips_pattern() {
        let pattern = HostmaskPattern::compile("*!*@*.example.com");
        assert_eq!(pattern.to_string(), "*!*@*.example.com");
        assert_eq!(pattern.pattern(), "*!*@*.example.com");
    }
}
