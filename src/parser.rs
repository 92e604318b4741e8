use std::iter::Peekable;
use std::str::CharIndices;

use crate::ast::{Accessor, Arg, Expr, Root};
use crate::error::{LogExprError, Result};

/// Parse the text of one reference (without its braces) into an [`Expr`].
///
/// Leading and trailing whitespace is ignored.
pub fn parse_expression(text: &str) -> Result<Expr> {
    let mut p = Parser {
        text,
        chars: text.char_indices().peekable(),
    };
    p.skip_ws();
    let root = p.parse_root()?;
    let mut chain = Vec::new();
    loop {
        match p.peek() {
            Some('.') => chain.push(p.parse_member()?),
            Some('[') => chain.push(Accessor::Index(p.parse_bracketed_arg()?)),
            _ => break,
        }
    }
    p.skip_ws();
    if let Some(c) = p.peek() {
        return Err(p.error(format!("unexpected character '{}'", c)));
    }
    Ok(Expr { root, chain })
}

// ---------------------------------------------------------------------------
// Internal parser state
// ---------------------------------------------------------------------------

struct Parser<'t> {
    text: &'t str,
    chars: Peekable<CharIndices<'t>>,
}

impl<'t> Parser<'t> {
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn position(&mut self) -> usize {
        self.chars.peek().map_or(self.text.len(), |&(i, _)| i)
    }

    fn error(&mut self, message: impl Into<String>) -> LogExprError {
        let position = self.position();
        LogExprError::grammar(self.text, position, message)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.chars.next();
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.chars.next();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of expression", expected))),
        }
    }

    fn digits(&mut self) -> &'t str {
        let start = self.position();
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.chars.next();
        }
        let end = self.position();
        let text = self.text;
        &text[start..end]
    }

    // -----------------------------------------------------------------------
    // Grammar
    // -----------------------------------------------------------------------

    /// `p<digits>` or `r`.
    fn try_root(&mut self) -> Result<Option<Root>> {
        match self.peek() {
            Some('r') => {
                self.chars.next();
                Ok(Some(Root::Result))
            }
            Some('p') => {
                self.chars.next();
                let digits = self.digits();
                if digits.is_empty() {
                    return Err(self.error("parameter marker 'p' needs an index"));
                }
                // No call has usize::MAX arguments, so an oversized index stays unbound.
                let index = digits.parse::<usize>().unwrap_or(usize::MAX);
                Ok(Some(Root::Param(index)))
            }
            _ => Ok(None),
        }
    }

    fn parse_root(&mut self) -> Result<Root> {
        match self.try_root()? {
            Some(root) => Ok(root),
            None => Err(self.error("expression must start with 'p<N>' or 'r'")),
        }
    }

    fn parse_ident(&mut self) -> Result<String> {
        let start = self.position();
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return Err(self.error("expected a member name")),
        }
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.chars.next();
        }
        let end = self.position();
        Ok(self.text[start..end].to_string())
    }

    /// `.name` or `.name(args)`.
    fn parse_member(&mut self) -> Result<Accessor> {
        self.expect('.')?;
        let name = self.parse_ident()?;
        if self.peek() != Some('(') {
            return Ok(Accessor::Member(name));
        }
        self.chars.next();
        self.skip_ws();
        let mut args = Vec::new();
        if self.peek() != Some(')') {
            loop {
                args.push(self.parse_arg()?);
                self.skip_ws();
                if self.peek() != Some(',') {
                    break;
                }
                self.chars.next();
                self.skip_ws();
            }
        }
        self.expect(')')?;
        Ok(Accessor::Call { name, args })
    }

    /// `[arg]`
    fn parse_bracketed_arg(&mut self) -> Result<Arg> {
        self.expect('[')?;
        self.skip_ws();
        let arg = self.parse_arg()?;
        self.skip_ws();
        self.expect(']')?;
        Ok(arg)
    }

    /// A root marker or an integer literal.
    fn parse_arg(&mut self) -> Result<Arg> {
        if let Some(root) = self.try_root()? {
            return Ok(Arg::Root(root));
        }
        let start = self.position();
        let negative = self.peek() == Some('-');
        if negative {
            self.chars.next();
        }
        if self.digits().is_empty() {
            return Err(self.error("expected 'p<N>', 'r' or an integer"));
        }
        let end = self.position();
        // Out-of-range literals saturate; every index they could reach is missing.
        let value = self.text[start..end]
            .parse::<i64>()
            .unwrap_or(if negative { i64::MIN } else { i64::MAX });
        Ok(Arg::Int(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner;

    fn member(name: &str) -> Accessor {
        Accessor::Member(name.to_string())
    }

    fn call(name: &str, args: Vec<Arg>) -> Accessor {
        Accessor::Call {
            name: name.to_string(),
            args,
        }
    }

    #[test]
    fn parses_bare_roots() {
        assert_eq!(
            parse_expression("p12").unwrap(),
            Expr {
                root: Root::Param(12),
                chain: vec![]
            }
        );
        assert_eq!(parse_expression("  r ").unwrap().root, Root::Result);
    }

    #[test]
    fn parses_mixed_chain() {
        let expr = parse_expression("p1.getSuggested(p2).friends[ -1 ].name").unwrap();
        assert_eq!(expr.root, Root::Param(1));
        assert_eq!(
            expr.chain,
            vec![
                call("getSuggested", vec![Arg::Root(Root::Param(2))]),
                member("friends"),
                Accessor::Index(Arg::Int(-1)),
                member("name"),
            ]
        );
    }

    #[test]
    fn parses_calls_with_several_or_no_args() {
        let expr = parse_expression("r.substring(1 , p0).trim( )").unwrap();
        assert_eq!(
            expr.chain,
            vec![
                call("substring", vec![Arg::Int(1), Arg::Root(Root::Param(0))]),
                call("trim", vec![]),
            ]
        );
    }

    #[test]
    fn rejects_malformed_expressions() {
        for text in ["", "x", "p", "p0.", "p0.1a", "p0(", "p0.m(", "p0.m(a)", "p0[", "p0[]", "p0 x", "rr"] {
            let err = parse_expression(text).unwrap_err();
            assert!(
                matches!(err, LogExprError::Grammar { .. }),
                "{text:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn grammar_error_reports_position() {
        match parse_expression("p0.name?") {
            Err(LogExprError::Grammar { position, .. }) => assert_eq!(position, 7),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn every_scanned_reference_parses() {
        let template = "{p0} { r } {p0.a.b()} {p1.get(p2)[0]} {p3.x(1, -2, r)[p0].y} {r[ 3 ]} \
                        {p99999999999999999999} {p0[-9223372036854775808]} {p0.m(99999999999999999999)}";
        let refs = scanner::scan(template);
        assert_eq!(refs.len(), 9);
        for r in refs {
            parse_expression(r.expression).unwrap();
        }
    }

    #[test]
    fn oversized_numbers_saturate() {
        assert_eq!(
            parse_expression("p99999999999999999999").unwrap().root,
            Root::Param(usize::MAX)
        );
        assert_eq!(
            parse_expression("p0[-9223372036854775808]").unwrap().chain,
            vec![Accessor::Index(Arg::Int(i64::MIN))]
        );
        assert_eq!(
            parse_expression("p0[-99999999999999999999]").unwrap().chain,
            vec![Accessor::Index(Arg::Int(i64::MIN))]
        );
        assert_eq!(
            parse_expression("p0.get(99999999999999999999)").unwrap().chain,
            vec![call("get", vec![Arg::Int(i64::MAX)])]
        );
    }
}
