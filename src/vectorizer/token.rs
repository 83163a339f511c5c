use indexmap::IndexMap;

use super::stop_words::StopWords;

/// Word characters: alphanumeric or `_`
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercase `text` and split it into maximal runs of word characters,
/// keeping runs of two characters or more
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().nth(1).is_some())
        .map(str::to_string)
        .collect()
}

///  TermFrequency 構造体
/// 1 文書内の term の出現回数を管理します
///
/// Terms keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    term_count: IndexMap<String, u32>,
}

impl TermFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize `text` and count every token not in `stop_words`
    pub fn from_text(text: &str, stop_words: Option<&StopWords>) -> Self {
        let mut freq = Self::new();
        for token in tokenize(text) {
            if stop_words.is_some_and(|sw| sw.contains(&token)) {
                continue;
            }
            freq.add_term(&token);
        }
        freq
    }

    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.to_string(), 1);
        }
        self
    }

    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.term_count.iter().map(|(t, &c)| (t.as_str(), c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_lowercases_and_drops_single_chars() {
        assert_eq!(
            tokenize("A Sci-Fi film, in 3D: WALL-E's_big day!"),
            vec!["sci", "fi", "film", "in", "3d", "wall", "s_big", "day"]
        );
    }

    #[test]
    fn tokenizer_keeps_unicode_words() {
        assert_eq!(tokenize("Amélie über  naïve"), vec!["amélie", "über", "naïve"]);
        assert!(tokenize("a b c - !").is_empty());
    }

    #[test]
    fn counts_terms() {
        let mut tf = TermFrequency::new();
        tf.add_terms(&["space", "opera", "space"]);
        assert_eq!(tf.iter().collect::<Vec<_>>(), vec![("space", 2), ("opera", 1)]);
    }

    #[test]
    fn from_text_applies_stop_words() {
        let english = StopWords::english();
        let tf = TermFrequency::from_text("The man in the iron mask", Some(&english));
        assert_eq!(tf.iter().collect::<Vec<_>>(), vec![("man", 1), ("iron", 1), ("mask", 1)]);

        let all = TermFrequency::from_text("The man in the iron mask", None);
        assert_eq!(all.iter().find(|(t, _)| *t == "the"), Some(("the", 2)));
        assert_eq!(all.iter().map(|(_, c)| c).sum::<u32>(), 6);
    }
}
