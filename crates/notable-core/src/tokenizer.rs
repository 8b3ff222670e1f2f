//! Token estimation for generation budget enforcement.
//!
//! The external API bills and limits by model tokens, which we cannot compute
//! exactly without the provider's tokenizer. This module provides a fast
//! heuristic estimate that blends a word-count figure with a character-count
//! figure, so the estimate degrades gracefully on text where word
//! segmentation is unreliable (CJK, code, long identifiers).

use crate::defaults::{RESERVED_TOKENS_ABS, RESERVED_TOKENS_FRACTION};

/// Estimate the number of model tokens `text` will consume.
///
/// Returns the ceiling of the average of two heuristics:
/// - words × 1.3 (average tokens per English word)
/// - characters / 4 (provider rule of thumb)
///
/// Empty input estimates to 0 and never errors.
pub fn estimate_tokens(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }

    let words = text.split_whitespace().count();
    let characters = text.chars().count();

    let word_based = words as f64 * 1.3;
    let char_based = characters as f64 / 4.0;

    ((word_based + char_based) / 2.0).ceil() as usize
}

/// Check whether `input_tokens` fits within `max_tokens` after reserving
/// head-room for the model's own output.
///
/// The reserve is min(2000, 20% of the budget), so an input can never sit
/// exactly at the limit.
pub fn fits_token_budget(input_tokens: usize, max_tokens: usize) -> bool {
    let reserved = RESERVED_TOKENS_ABS.min((max_tokens as f64 * RESERVED_TOKENS_FRACTION) as usize);
    input_tokens <= max_tokens.saturating_sub(reserved)
}

/// Truncate `text` so its estimated token count fits within `max_tokens`.
///
/// Cuts proportionally to the token overage with a 10% extra margin, and
/// appends an ellipsis marker. Text already within budget is returned
/// unchanged.
pub fn truncate_to_tokens(text: &str, max_tokens: usize) -> String {
    let estimated = estimate_tokens(text);
    if estimated <= max_tokens {
        return text.to_string();
    }

    let ratio = max_tokens as f64 / estimated as f64;
    let target_chars = (text.chars().count() as f64 * ratio * 0.9).floor() as usize;

    let truncated: String = text.chars().take(target_chars).collect();
    format!("{}...", truncated)
}
