//! Content heuristics used for answer-engine friendly summaries
//!
//! Plain string heuristics: sentence splitting, word counts, keyword density
//! and heading extraction. Markdown markup is tolerated; tokens without any
//! alphanumeric character are not counted as words.

use super::metadata::truncate_with_ellipsis;

/// Reading speed used for reading-time estimates
pub const WORDS_PER_MINUTE: usize = 200;

fn is_word(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}

/// Lowercased word tokens with surrounding punctuation stripped
fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| is_word(t))
        .map(str::to_lowercase)
        .collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().filter(|t| is_word(t)).count()
}

/// Whole minutes at [`WORDS_PER_MINUTE`], never less than one
pub fn reading_time_minutes(text: &str) -> usize {
    word_count(text).div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Split on `.`, `!` or `?` followed by whitespace or end of text
///
/// Line breaks also end a sentence so headings and list items stay separate.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            push_sentence(&mut sentences, &mut current);
            continue;
        }

        current.push(c);

        if matches!(c, '.' | '!' | '?') {
            match chars.peek() {
                None => push_sentence(&mut sentences, &mut current),
                Some(next) if next.is_whitespace() => push_sentence(&mut sentences, &mut current),
                _ => {}
            }
        }
    }
    push_sentence(&mut sentences, &mut current);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if is_word(trimmed) {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

/// Occurrences of `keyword` per 100 words, matched case-insensitively on
/// whole words; multi-word keywords match as a phrase
pub fn keyword_density(text: &str, keyword: &str) -> f64 {
    let haystack = words(text);
    let needle = words(keyword);

    if haystack.is_empty() || needle.is_empty() || needle.len() > haystack.len() {
        return 0.0;
    }

    let occurrences = haystack
        .windows(needle.len())
        .filter(|window| *window == needle.as_slice())
        .count();

    occurrences as f64 * 100.0 / haystack.len() as f64
}

/// A Markdown ATX heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: usize,
    pub text: String,
}

/// ATX headings (`#` .. `######`) in document order
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    markdown
        .lines()
        .filter_map(|line| {
            let line = line.trim_start();
            let level = line.chars().take_while(|c| *c == '#').count();
            if level == 0 || level > 6 {
                return None;
            }
            let rest = &line[level..];
            if !rest.starts_with(' ') {
                return None;
            }
            let text = rest.trim().trim_end_matches('#').trim();
            if text.is_empty() {
                return None;
            }
            Some(Heading {
                level,
                text: text.to_string(),
            })
        })
        .collect()
}

/// Leading sentences that fit in `max_chars`
///
/// Headings are skipped. When even the first sentence is too long it is
/// clipped with an ellipsis.
pub fn summarize(text: &str, max_chars: usize) -> String {
    let mut summary = String::new();

    for sentence in split_sentences(text)
        .into_iter()
        .filter(|s| !s.starts_with('#'))
    {
        let needed = if summary.is_empty() {
            sentence.chars().count()
        } else {
            summary.chars().count() + 1 + sentence.chars().count()
        };

        if needed > max_chars {
            if summary.is_empty() {
                return truncate_with_ellipsis(&sentence, max_chars);
            }
            break;
        }

        if !summary.is_empty() {
            summary.push(' ');
        }
        summary.push_str(&sentence);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_ignores_markup() {
        assert_eq!(word_count("## Why AI support - it works!"), 5);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time_minutes("short"), 1);
        assert_eq!(reading_time_minutes(&"word ".repeat(200)), 1);
        assert_eq!(reading_time_minutes(&"word ".repeat(201)), 2);
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("AI is here. Is it useful? Yes! Version 2.5 shipped.\n# Heading");
        assert_eq!(
            sentences,
            vec!["AI is here.", "Is it useful?", "Yes!", "Version 2.5 shipped.", "# Heading"]
        );
    }

    #[test]
    fn test_keyword_density() {
        let text = "AI tools help. Customer service AI tools answer faster than people.";
        let density = keyword_density(text, "AI tools");
        // 2 occurrences in 11 words
        assert!((density - 200.0 / 11.0).abs() < 1e-9);
        assert_eq!(keyword_density(text, "blockchain"), 0.0);
        assert_eq!(keyword_density("", "ai"), 0.0);
    }

    #[test]
    fn test_keyword_density_whole_words_only() {
        assert_eq!(keyword_density("paid unpaid prepaid", "paid"), 100.0 / 3.0);
    }

    #[test]
    fn test_extract_headings() {
        let headings = extract_headings("# Title\ntext\n## Section ##\n#hashtag\n####### too deep");
        assert_eq!(
            headings,
            vec![
                Heading { level: 1, text: "Title".to_string() },
                Heading { level: 2, text: "Section".to_string() },
            ]
        );
    }

    #[test]
    fn test_summarize_fits_budget() {
        let text = "# Intro\nFirst sentence here. Second one follows. Third is long enough to overflow.";
        assert_eq!(summarize(text, 45), "First sentence here. Second one follows.");
        assert_eq!(summarize("Averyveryverylongsentence.", 10), "Averyve...");
    }
}
