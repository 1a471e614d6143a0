//! Sentence-preserving truncation of pipeline text.
//!
//! ## Why truncate twice?
//!
//! The pipeline has two character budgets. Extracted paper text is cut to
//! [`MAX_PAPER_CHARS`] so it fits the generation model's context alongside
//! the system prompt (12,000 chars is roughly 3,000 tokens). The generated
//! script is cut again to [`MAX_SCRIPT_CHARS`], which sits under the speech
//! synthesizer's hard input ceiling of about 4,096 characters. The prompt
//! already asks the model to stay under the script budget, but model
//! compliance is not guaranteed, so the second pass is mandatory.
//!
//! ## Why whole sentences?
//!
//! A hard cut at the character limit can end mid-word or mid-claim, which
//! reads badly in a spoken narration. Instead the text is split into
//! sentence-like units (anything up to and including a run of `.`, `!`, `?`)
//! and units are accumulated until the next one would overflow the budget.
//! The first overflowing unit and everything after it are dropped entirely.

use once_cell::sync::Lazy;
use regex::Regex;

/// Character budget for extracted paper text sent to the generation model.
pub const MAX_PAPER_CHARS: usize = 12_000;

/// Character budget for the narration script sent to the speech synthesizer.
/// Kept under the synthesizer's 4,096-character input ceiling.
pub const MAX_SCRIPT_CHARS: usize = 4_000;

/// A sentence-like unit: one or more non-terminal characters followed by a
/// run of terminal punctuation. Inter-sentence whitespace attaches to the
/// start of the following unit.
static RE_SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").unwrap());

/// Shrink `text` to at most `max_chars` characters without splitting any
/// retained sentence.
///
/// Units are accumulated in order while the running character count stays at
/// or under the limit; the first unit that would exceed it ends the scan.
/// The result is trimmed of surrounding whitespace. Text with no terminal
/// punctuation at all yields an empty string regardless of length, as does a
/// limit smaller than the first sentence.
///
/// Lengths are counted in `char`s, not bytes, so multi-byte text cannot
/// overshoot a model budget expressed in characters.
pub fn truncate(text: &str, max_chars: usize) -> String {
    let mut result = String::new();
    let mut count = 0usize;

    for unit in RE_SENTENCE.find_iter(text) {
        let unit = unit.as_str();
        let unit_chars = unit.chars().count();
        if count + unit_chars > max_chars {
            break;
        }
        result.push_str(unit);
        count += unit_chars;
    }

    result.trim().to_string()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_whole_sentences_under_limit() {
        let text = "First sentence. Second sentence. Third sentence.";
        assert_eq!(truncate(text, 32), "First sentence. Second sentence.");
    }

    #[test]
    fn test_overflowing_sentence_dropped_entirely() {
        // The second unit (" Second sentence." = 17 chars) would pass 20,
        // so it is dropped whole rather than cut at the boundary.
        let text = "First sentence. Second sentence.";
        assert_eq!(truncate(text, 20), "First sentence.");
    }

    #[test]
    fn test_nothing_after_break_is_included() {
        // A short sentence after the overflowing one must not sneak in.
        let text = "First sentence. An overlong middle sentence here. Ok.";
        assert_eq!(truncate(text, 25), "First sentence.");
    }

    #[test]
    fn test_no_terminal_punctuation_yields_empty() {
        let text = "no sentence boundary anywhere in this text";
        assert_eq!(truncate(text, 10), "");
        assert_eq!(truncate(text, 10_000), "");
    }

    #[test]
    fn test_limit_smaller_than_first_sentence_yields_empty() {
        assert_eq!(truncate("This sentence is long.", 5), "");
    }

    #[test]
    fn test_zero_limit_yields_empty() {
        assert_eq!(truncate("Hi.", 0), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(truncate("", 100), "");
    }

    #[test]
    fn test_exact_fit_is_kept() {
        // "Hello." is exactly 6 chars.
        assert_eq!(truncate("Hello.", 6), "Hello.");
    }

    #[test]
    fn test_whole_text_survives_generous_limit() {
        let text = "One. Two! Three?";
        assert_eq!(truncate(text, 1_000), text);
    }

    #[test]
    fn test_leading_whitespace_trimmed() {
        assert_eq!(truncate("   Padded start.", 100), "Padded start.");
    }

    #[test]
    fn test_question_and_exclamation_are_boundaries() {
        let text = "Really? Yes! Definitely.";
        assert_eq!(truncate(text, 12), "Really? Yes!");
    }

    #[test]
    fn test_newlines_inside_sentences_kept() {
        let text = "Spans\ntwo lines. Next one.";
        assert_eq!(truncate(text, 16), "Spans\ntwo lines.");
    }

    #[test]
    fn test_multibyte_chars_counted_once() {
        // 12 chars but 14 bytes; a byte count would drop the only sentence.
        let text = "Héllo wörld.";
        assert_eq!(truncate(text, 12), text);
    }

    #[test]
    fn test_result_never_exceeds_limit() {
        let text = "Alpha beta gamma. Delta epsilon! Zeta eta theta? Iota kappa.";
        for limit in 0..=text.len() + 5 {
            let out = truncate(text, limit);
            assert!(
                out.chars().count() <= limit,
                "limit {limit} produced {} chars: {out:?}",
                out.chars().count()
            );
        }
    }

    #[test]
    fn test_nonempty_result_ends_with_terminal_punctuation() {
        let text = "Alpha beta gamma. Delta epsilon! Zeta eta theta? Iota kappa.";
        for limit in 0..=text.len() + 5 {
            let out = truncate(text, limit);
            if !out.is_empty() {
                let last = out.chars().last().unwrap();
                assert!(
                    matches!(last, '.' | '!' | '?'),
                    "limit {limit} ended with {last:?}: {out:?}"
                );
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let text = "  One sentence here. Another follows! A third? And more text. ";
        for limit in [0, 5, 18, 40, 200] {
            let once = truncate(text, limit);
            let twice = truncate(&once, limit);
            assert_eq!(twice, once, "not idempotent at limit {limit}");
        }
    }

    #[test]
    fn test_script_budget_stays_under_synthesizer_ceiling() {
        assert!(MAX_SCRIPT_CHARS < 4_096);
        assert!(MAX_SCRIPT_CHARS <= MAX_PAPER_CHARS);
    }
}
