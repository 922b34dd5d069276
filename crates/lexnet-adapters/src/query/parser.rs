//! Query parser.
//!
//! ```text
//! query    := unit [ relspec [ unit ] ]
//! unit     := lemma [ ":" [category] [ ":" sense ] ]
//! relspec  := "+" | digit | name | name digit | name "+"
//! ```

use lexnet_common::Category;
use lexnet_common::utils::error::{Error, QueryError, QueryErrorKind, Result, Span};
use lexnet_common::utils::strings::{find_similar, format_suggestion};

use super::ast::{DepthSpec, Query, RelationSpec, UnitPattern};
use super::lexer::{Lexer, Token, TokenKind};

const CATEGORY_NAMES: [&str; 6] = ["noun", "verb", "adj", "adv", "adjective", "adverb"];

fn syntax_error(message: impl Into<String>, span: Span) -> Error {
    QueryError::new(QueryErrorKind::Syntax, message)
        .with_span(span)
        .into()
}

/// Query parser.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
}

impl<'a> Parser<'a> {
    /// Creates a parser for `query`.
    pub fn new(query: &'a str) -> Self {
        let mut lexer = Lexer::new(query);
        let current = lexer.next_token();
        let previous = Token {
            kind: TokenKind::Eof,
            text: String::new(),
            span: current.span,
        };
        Self {
            lexer,
            current,
            previous,
        }
    }

    /// Parses a complete query.
    ///
    /// # Errors
    ///
    /// Returns a syntax [`QueryError`] pointing at the offending token.
    pub fn parse(&mut self) -> Result<Query> {
        if self.current.kind == TokenKind::Eof {
            return Err(self.error("empty query"));
        }
        let unit = self.parse_unit()?;
        if self.at_end() {
            return Ok(Query::Lookup(unit));
        }
        let relation = self.parse_relation()?;
        if self.at_end() {
            return Ok(Query::Related { unit, relation });
        }
        let to = self.parse_unit()?;
        if !self.at_end() {
            return Err(self.error("expected end of query"));
        }
        Ok(Query::Path {
            from: unit,
            relation,
            to,
        })
    }

    /// Parses input holding exactly one unit pattern.
    ///
    /// # Errors
    ///
    /// Returns a syntax [`QueryError`] if the input is not a single unit.
    pub fn parse_single_unit(&mut self) -> Result<UnitPattern> {
        let unit = self.parse_unit()?;
        if !self.at_end() {
            return Err(self.error("expected a single lemma"));
        }
        Ok(unit)
    }

    fn parse_unit(&mut self) -> Result<UnitPattern> {
        let token = self.expect_word("a lemma")?;
        let text = token.text.as_str();
        let base = token.span.start;

        let (lemma, rest_at) = if let Some(quoted) = text.strip_prefix('"') {
            let Some(close) = quoted.find('"') else {
                return Err(syntax_error("unterminated quote", token.span));
            };
            (&quoted[..close], close + 2)
        } else {
            let end = text.find(':').unwrap_or(text.len());
            if let Some(quote) = text[..end].find('"') {
                return Err(syntax_error(
                    "quote inside lemma",
                    Span::new(base + quote, base + quote + 1),
                ));
            }
            (&text[..end], end)
        };
        if lemma.trim().is_empty() {
            return Err(syntax_error("empty lemma", token.span));
        }

        let mut pattern = UnitPattern {
            lemma: lemma.to_string(),
            category: None,
            sense: None,
            span: token.span,
        };
        let rest = &text[rest_at..];
        if rest.is_empty() {
            return Ok(pattern);
        }
        let Some(rest) = rest.strip_prefix(':') else {
            return Err(syntax_error(
                "expected ':' after quoted lemma",
                Span::new(base + rest_at, token.span.end),
            ));
        };

        let category_at = base + rest_at + 1;
        let (category, sense) = match rest.split_once(':') {
            Some((category, sense)) => (category, Some(sense)),
            None => (rest, None),
        };
        if !category.is_empty() {
            let span = Span::new(category_at, category_at + category.len());
            match Category::normalize(category) {
                Some((category, _)) => pattern.category = Some(category),
                None => {
                    let mut err = QueryError::new(
                        QueryErrorKind::Syntax,
                        format!("unknown category '{category}'"),
                    )
                    .with_span(span);
                    if let Some(similar) = find_similar(category, &CATEGORY_NAMES) {
                        err = err.with_suggestion(format_suggestion(similar));
                    }
                    return Err(err.into());
                }
            }
        }
        if let Some(sense) = sense {
            let sense_at = category_at + category.len() + 1;
            let span = Span::new(sense_at, sense_at + sense.len());
            match sense.parse::<u32>() {
                Ok(number) if number >= 1 => pattern.sense = Some(number),
                _ => return Err(syntax_error("sense must be a positive number", span)),
            }
        }
        Ok(pattern)
    }

    fn parse_relation(&mut self) -> Result<RelationSpec> {
        let token = self.expect_word("a relation")?;
        let text = token.text.as_str();

        let (name, depth) = if let Some(name) = text.strip_suffix('+') {
            (name, DepthSpec::Max)
        } else if let Some(last) = text.chars().last()
            && last.is_ascii_digit()
        {
            let name = &text[..text.len() - 1];
            if last == '0' {
                return Err(syntax_error(
                    "depth must be between 1 and 9",
                    Span::new(token.span.end - 1, token.span.end),
                ));
            }
            (name, DepthSpec::Exactly(last as u8 - b'0'))
        } else {
            (text, DepthSpec::Default)
        };

        if let Some(offset) = name.find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-')) {
            let at = token.span.start + offset;
            let width = name[offset..].chars().next().map_or(1, char::len_utf8);
            return Err(syntax_error(
                "invalid character in relation name",
                Span::new(at, at + width),
            ));
        }

        Ok(RelationSpec {
            name: (!name.is_empty()).then(|| name.to_string()),
            depth,
            span: token.span,
        })
    }

    fn expect_word(&mut self, what: &str) -> Result<Token> {
        match self.current.kind {
            TokenKind::Word => {
                self.advance();
                Ok(self.previous.clone())
            }
            TokenKind::UnterminatedQuote => Err(self.error("unterminated quote")),
            TokenKind::Eof => Err(self.error(&format!("expected {what}"))),
        }
    }

    fn at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    fn advance(&mut self) {
        self.previous = std::mem::replace(&mut self.current, self.lexer.next_token());
    }

    fn error(&self, message: &str) -> Error {
        syntax_error(message, self.current.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(query: &str) -> Query {
        let mut parser = Parser::new(query);
        parser
            .parse()
            .unwrap_or_else(|e| panic!("Failed to parse {query:?}: {e}"))
    }

    fn parse_err(query: &str) -> QueryError {
        let mut parser = Parser::new(query);
        match parser.parse() {
            Err(Error::Query(err)) => err,
            other => panic!("Expected query error for {query:?}, got {other:?}"),
        }
    }

    fn span(query: &str) -> (usize, usize) {
        let span = parse_err(query).span.expect("span");
        (span.start, span.end)
    }

    // ==================== Query forms ====================

    #[test]
    fn test_lookup() {
        let Query::Lookup(unit) = parse_ok("taal") else {
            panic!("expected lookup");
        };
        assert_eq!(unit.lemma, "taal");
        assert_eq!(unit.category, None);
        assert_eq!(unit.sense, None);
        assert_eq!(unit.span, Span::new(0, 4));
    }

    #[test]
    fn test_related() {
        let Query::Related { unit, relation } = parse_ok("taal has_hyperonym") else {
            panic!("expected relation query");
        };
        assert_eq!(unit.lemma, "taal");
        assert_eq!(relation.name.as_deref(), Some("has_hyperonym"));
        assert_eq!(relation.depth, DepthSpec::Default);
        assert_eq!(relation.span, Span::new(5, 18));
    }

    #[test]
    fn test_path() {
        let Query::Path { from, relation, to } = parse_ok("taal + spraak") else {
            panic!("expected path query");
        };
        assert_eq!(from.lemma, "taal");
        assert_eq!(relation.name, None);
        assert_eq!(relation.depth, DepthSpec::Max);
        assert_eq!(to.lemma, "spraak");
    }

    // ==================== Units ====================

    #[test]
    fn test_unit_with_category_and_sense() {
        let Query::Lookup(unit) = parse_ok("taal:noun:2") else {
            panic!("expected lookup");
        };
        assert_eq!(unit.category, Some(Category::Noun));
        assert_eq!(unit.sense, Some(2));
        assert!(unit.is_specific());
    }

    #[test]
    fn test_unit_with_sense_only() {
        let Query::Lookup(unit) = parse_ok("taal::3") else {
            panic!("expected lookup");
        };
        assert_eq!(unit.category, None);
        assert_eq!(unit.sense, Some(3));
    }

    #[test]
    fn test_category_spellings() {
        for (query, category) in [
            ("snel:ADJ", Category::Adj),
            ("snel:adjective", Category::Adj),
            ("gauw:adverb", Category::Adv),
            ("lopen:Verb", Category::Verb),
        ] {
            let Query::Lookup(unit) = parse_ok(query) else {
                panic!("expected lookup");
            };
            assert_eq!(unit.category, Some(category), "{query}");
        }
    }

    #[test]
    fn test_quoted_lemma() {
        let Query::Related { unit, .. } = parse_ok(r#""ad hoc":adj synonym"#) else {
            panic!("expected relation query");
        };
        assert_eq!(unit.lemma, "ad hoc");
        assert_eq!(unit.category, Some(Category::Adj));
    }

    // ==================== Relation specs ====================

    #[test]
    fn test_relation_depths() {
        let depth = |query: &str| match parse_ok(query) {
            Query::Related { relation, .. } => (relation.name, relation.depth),
            other => panic!("expected relation query, got {other:?}"),
        };
        assert_eq!(
            depth("taal has_hyperonym3"),
            (Some("has_hyperonym".to_string()), DepthSpec::Exactly(3))
        );
        assert_eq!(
            depth("taal has_hyperonym+"),
            (Some("has_hyperonym".to_string()), DepthSpec::Max)
        );
        assert_eq!(depth("taal 2"), (None, DepthSpec::Exactly(2)));
        assert_eq!(depth("taal +"), (None, DepthSpec::Max));
        assert_eq!(
            depth("taal ROLE-AGENT"),
            (Some("ROLE-AGENT".to_string()), DepthSpec::Default)
        );
    }

    // ==================== Errors ====================

    #[test]
    fn test_empty_query() {
        assert_eq!(span("   "), (3, 3));
    }

    #[test]
    fn test_zero_depth() {
        let err = parse_err("taal synonym0");
        assert_eq!(err.kind, QueryErrorKind::Syntax);
        assert_eq!(err.span, Some(Span::new(12, 13)));
    }

    #[test]
    fn test_bad_relation_character() {
        assert_eq!(span("taal has.hyperonym"), (8, 9));
    }

    #[test]
    fn test_trailing_token() {
        assert_eq!(span("taal + spraak extra"), (14, 19));
    }

    #[test]
    fn test_unknown_category_suggests() {
        let err = parse_err("taal:nuon");
        assert_eq!(err.span, Some(Span::new(5, 9)));
        assert_eq!(err.suggestion.as_deref(), Some("Did you mean 'noun'?"));
    }

    #[test]
    fn test_bad_sense() {
        assert_eq!(span("taal:noun:x"), (10, 11));
        assert_eq!(span("taal:noun:0"), (10, 11));
        assert_eq!(span("taal:noun:"), (10, 10));
    }

    #[test]
    fn test_empty_lemma() {
        assert_eq!(span(":noun"), (0, 5));
        assert_eq!(span(r#""" synonym"#), (0, 2));
    }

    #[test]
    fn test_quote_errors() {
        assert_eq!(span(r#"taal "ad hoc"#), (5, 12));
        assert_eq!(span(r#"ta"a"l"#), (2, 3));
        assert_eq!(span(r#""ad hoc"x"#), (8, 9));
    }

    #[test]
    fn test_error_message_has_position() {
        let err = parse_err("taal synonym0");
        assert_eq!(err.to_string(), "syntax error: depth must be between 1 and 9 at 12..13");
    }
}
