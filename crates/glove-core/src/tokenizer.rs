//! Text segmentation ahead of vector lookup.

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str, language: &str) -> Vec<String>;
}

/// Lowercasing word/punctuation splitter matching the GloVe vocabularies.
///
/// Alphanumeric runs become one token (inner apostrophes stay attached, so
/// `don't` survives); every other non-whitespace character is a token of its
/// own.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleTokenizer;

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str, language: &str) -> Vec<String> {
        if language != "en" {
            tracing::debug!(language, "no dedicated tokenizer, using default rules");
        }

        let mut tokens = Vec::new();
        let mut word = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_alphanumeric() {
                word.extend(c.to_lowercase());
            } else if c == '\''
                && !word.is_empty()
                && chars.peek().is_some_and(|n| n.is_alphanumeric())
            {
                word.push(c);
            } else {
                if !word.is_empty() {
                    tokens.push(std::mem::take(&mut word));
                }
                if !c.is_whitespace() {
                    tokens.push(c.to_string());
                }
            }
        }
        if !word.is_empty() {
            tokens.push(word);
        }

        tokens
    }
}
