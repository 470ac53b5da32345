//! Query tokenizer
//!
//! Single left-to-right pass. Whitespace and `'` end the current word
//! without producing a token; `,`, `(` and `)` end the current word and
//! produce a token of their own. There is no quoted-string state: a quoted
//! literal containing a comma or parenthesis still splits.

/// Token kinds. Keywords are plain raw text; the parser recognizes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    RawText,
    Comma,
    OpeningParenthesis,
    ClosingParenthesis,
}

/// A lexeme and its kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
        }
    }

    /// Raw text token
    pub fn raw(lexeme: impl Into<String>) -> Self {
        Self::new(TokenKind::RawText, lexeme)
    }

    /// Case-insensitive keyword match, raw text only
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::RawText && self.lexeme.eq_ignore_ascii_case(keyword)
    }
}

fn flush(buffer: &mut String, tokens: &mut Vec<Token>) {
    if !buffer.is_empty() {
        tokens.push(Token::raw(std::mem::take(buffer)));
    }
}

/// Splits a query into tokens
pub fn tokenize(query: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut buffer = String::new();

    for ch in query.chars() {
        let punctuation = match ch {
            ',' => Some(TokenKind::Comma),
            '(' => Some(TokenKind::OpeningParenthesis),
            ')' => Some(TokenKind::ClosingParenthesis),
            _ => None,
        };

        if let Some(kind) = punctuation {
            flush(&mut buffer, &mut tokens);
            tokens.push(Token::new(kind, ch.to_string()));
        } else if ch.is_whitespace() || ch == '\'' {
            flush(&mut buffer, &mut tokens);
        } else {
            buffer.push(ch);
        }
    }
    flush(&mut buffer, &mut tokens);

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexemes(query: &str) -> Vec<String> {
        tokenize(query).into_iter().map(|t| t.lexeme).collect()
    }

    #[test]
    fn test_words_and_punctuation() {
        let tokens = tokenize("select lower(name), size from .");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::RawText,
                TokenKind::RawText,
                TokenKind::OpeningParenthesis,
                TokenKind::RawText,
                TokenKind::ClosingParenthesis,
                TokenKind::Comma,
                TokenKind::RawText,
                TokenKind::RawText,
                TokenKind::RawText,
            ]
        );
        assert_eq!(
            lexemes("select lower(name), size from ."),
            vec!["select", "lower", "(", "name", ")", ",", "size", "from", "."]
        );
    }

    #[test]
    fn test_quotes_only_separate() {
        assert_eq!(lexemes("concat(name,'-FILE')"), vec!["concat", "(", "name", ",", "-FILE", ")"]);
        assert_eq!(lexemes("'hello world'"), vec!["hello", "world"]);
    }

    #[test]
    fn test_quoted_comma_still_splits() {
        assert_eq!(lexemes("'a,b'"), vec!["a", ",", "b"]);
        assert_eq!(lexemes("'f(x)'"), vec!["f", "(", "x", ")"]);
    }

    #[test]
    fn test_collapses_repeated_separators() {
        assert_eq!(lexemes("  select\t\nname  "), vec!["select", "name"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let token = Token::raw("SeLeCt");
        assert!(token.is_keyword("select"));
        assert!(!Token::new(TokenKind::Comma, ",").is_keyword(","));
    }
}
