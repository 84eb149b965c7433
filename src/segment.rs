//! Word and sentence boundaries.

use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());
pub(crate) static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").unwrap());
pub(crate) static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?…]+\s+").unwrap());

/// Signature of a sentence splitter. Any pure function producing the ordered
/// sentences of a text can be plugged into the pipeline.
pub type SentenceSplitter = fn(&str) -> Vec<String>;

/// Collapses every run of non-word characters into a single space. This is the
/// text handed to the primary analyzer.
pub fn normalize(text: &str) -> String {
    NON_WORD.replace_all(text, " ").into_owned()
}

/// Maximal runs of word characters, in order.
pub fn words(sentence: &str) -> Vec<&str> {
    WORD.find_iter(sentence).map(|m| m.as_str()).collect()
}

/// Splits after a run of terminal punctuation when the next sentence starts with
/// an uppercase letter or a digit.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END.find_iter(text) {
        let starts_sentence = text[m.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase() || c.is_numeric());
        if !starts_sentence {
            continue;
        }
        push_trimmed(&mut sentences, &text[start..m.end()]);
        start = m.end();
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

/// Line breaks inside a sentence become single spaces.
fn push_trimmed(out: &mut Vec<String>, sentence: &str) {
    let sentence = WHITESPACE.replace_all(sentence.trim(), " ");
    if !sentence.is_empty() {
        out.push(sentence.into_owned());
    }
}

pub(crate) fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphanumeric)
}

pub(crate) fn is_numeric(s: &str) -> bool {
    DIGITS.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_non_word_runs() {
        assert_eq!(normalize("Кот сидит... на окне!"), "Кот сидит на окне ");
        assert_eq!(normalize("a -- b"), "a b");
    }

    #[test]
    fn test_words() {
        assert_eq!(words("Кот, сидит -- 42 раза."), vec!["Кот", "сидит", "42", "раза"]);
        assert!(words("...").is_empty());
    }

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences("Кот сидит. Пёс лежит! А ты? 2024 год прошёл."),
            vec!["Кот сидит.", "Пёс лежит!", "А ты?", "2024 год прошёл."]
        );
    }

    #[test]
    fn test_split_sentences_keeps_lowercase_continuation() {
        assert_eq!(
            split_sentences("См. выше и т. д. Конец"),
            vec!["См. выше и т. д.", "Конец"]
        );
    }

    #[test]
    fn test_split_sentences_empty() {
        assert!(split_sentences("   ").is_empty());
        assert_eq!(split_sentences("один"), vec!["один"]);
    }

    #[test]
    fn test_alphanumeric_checks() {
        assert!(is_alphanumeric("Кот"));
        assert!(is_alphanumeric("42"));
        assert!(!is_alphanumeric(" "));
        assert!(!is_alphanumeric(""));
        assert!(!is_alphanumeric("a,b"));
        assert!(is_numeric("42"));
        assert!(!is_numeric("4a"));
        assert!(!is_numeric(""));
        assert!(is_numeric("٤٢"));
        assert!(!is_numeric("Ⅻ"));
        assert!(!is_numeric("½"));
    }

    #[test]
    fn test_split_sentences_joins_lines() {
        assert_eq!(
            split_sentences("Заголовок статьи\nКот спит.\n\nПёс\tлежит."),
            vec!["Заголовок статьи Кот спит.", "Пёс лежит."]
        );
    }
}
