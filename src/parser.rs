// ABOUTME: Parser turning qlisp source text into Value trees using nom combinators

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace1},
    combinator::value,
    multi::many0,
    IResult, Parser,
};

use crate::error::LispError;
use crate::value::Value;

/// Characters that may appear in a bare token. Digits are included: a token
/// that is entirely digits (with an optional leading minus) reads as a
/// number, anything else as a symbol.
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_+-*/\\=<>!&|".contains(c)
}

/// Skip whitespace and line comments (`;` to end of line).
fn ws_and_comments(input: &str) -> IResult<&str, ()> {
    many0(alt((
        value((), multispace1),
        value((), (char(';'), take_while(|c| c != '\n' && c != '\r'))),
    )))
    .map(|_| ())
    .parse(input)
}

/// Parse a bare token and classify it as a number or a symbol.
fn parse_atom(input: &str) -> IResult<&str, Value> {
    let (rest, token) = take_while1(is_token_char)(input)?;
    Ok((rest, read_atom(token)))
}

/// A number token that overflows i64 becomes an Error value in the tree; it
/// poisons the enclosing S-expression at evaluation time instead of
/// aborting the parse.
fn read_atom(token: &str) -> Value {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        match token.parse::<i64>() {
            Ok(n) => Value::Num(n),
            Err(_) => Value::Err(LispError::InvalidNumber(token.to_string())),
        }
    } else {
        Value::Sym(token.to_string())
    }
}

/// Parse a double-quoted string, decoding the standard escape sequences.
fn parse_string(input: &str) -> IResult<&str, Value> {
    let (body, _) = char('"')(input)?;
    let mut decoded = String::new();
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((&body[i + 1..], Value::Str(decoded))),
            '\\' => match chars.next() {
                Some((_, esc)) => push_unescaped(&mut decoded, esc),
                None => break,
            },
            _ => decoded.push(c),
        }
    }
    // Unterminated string literal.
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

/// Decode one escape sequence; unknown escapes are kept verbatim.
fn push_unescaped(out: &mut String, c: char) {
    match c {
        'n' => out.push('\n'),
        't' => out.push('\t'),
        'r' => out.push('\r'),
        '"' => out.push('"'),
        '\\' => out.push('\\'),
        '0' => out.push('\0'),
        'a' => out.push('\x07'),
        'b' => out.push('\x08'),
        'f' => out.push('\x0c'),
        'v' => out.push('\x0b'),
        other => {
            out.push('\\');
            out.push(other);
        }
    }
}

fn parse_sexpr(input: &str) -> IResult<&str, Value> {
    let (rest, items) = parse_seq(input, '(', ')')?;
    Ok((rest, Value::Sexpr(items)))
}

fn parse_qexpr(input: &str) -> IResult<&str, Value> {
    let (rest, items) = parse_seq(input, '{', '}')?;
    Ok((rest, Value::Qexpr(items)))
}

/// Parse a delimited sequence of expressions, allowing whitespace and
/// comments between elements.
fn parse_seq(input: &str, open: char, close: char) -> IResult<&str, Vec<Value>> {
    let (input, _) = char(open)(input)?;
    let mut items = Vec::new();
    let mut remaining = input;
    loop {
        let (rest, _) = ws_and_comments(remaining)?;
        if let Ok((rest, _)) = char::<_, nom::error::Error<_>>(close)(rest) {
            return Ok((rest, items));
        }
        let (rest, expr) = parse_expr(rest)?;
        items.push(expr);
        remaining = rest;
    }
}

fn parse_expr(input: &str) -> IResult<&str, Value> {
    let (input, _) = ws_and_comments(input)?;
    alt((parse_sexpr, parse_qexpr, parse_string, parse_atom)).parse(input)
}

/// Parse a whole program: zero or more top-level expressions.
pub fn parse(input: &str) -> Result<Vec<Value>, String> {
    let mut exprs = Vec::new();
    let mut remaining = input;
    loop {
        let (rest, _) = ws_and_comments(remaining).unwrap_or((remaining, ()));
        if rest.is_empty() {
            return Ok(exprs);
        }
        match parse_expr(rest) {
            Ok((rest, expr)) => {
                exprs.push(expr);
                remaining = rest;
            }
            Err(_) => {
                let at: String = rest.chars().take(20).collect();
                return Err(format!("unexpected input at '{}'", at));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(input: &str) -> Value {
        let mut exprs = parse(input).expect("parse should succeed");
        assert_eq!(exprs.len(), 1, "expected exactly one expression");
        exprs.remove(0)
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_one("42"), Value::Num(42));
        assert_eq!(parse_one("-42"), Value::Num(-42));
        assert_eq!(parse_one("0"), Value::Num(0));
    }

    #[test]
    fn test_number_overflow_reads_as_error() {
        let text = "99999999999999999999";
        assert_eq!(
            parse_one(text),
            Value::Err(LispError::InvalidNumber(text.to_string()))
        );
    }

    #[test]
    fn test_parse_symbols() {
        assert!(matches!(parse_one("foo"), Value::Sym(s) if s == "foo"));
        assert!(matches!(parse_one("foo_bar-1"), Value::Sym(s) if s == "foo_bar-1"));
        for op in ["+", "-", "*", "/", "\\", "=", "<=", ">=", "==", "!=", "&", "&&", "||", "!"] {
            assert!(matches!(parse_one(op), Value::Sym(s) if s == op), "operator {}", op);
        }
    }

    #[test]
    fn test_parse_strings_with_escapes() {
        assert_eq!(parse_one(r#""hello""#), Value::Str("hello".to_string()));
        assert_eq!(parse_one(r#""""#), Value::Str(String::new()));
        assert_eq!(
            parse_one(r#""a\nb\tc""#),
            Value::Str("a\nb\tc".to_string())
        );
        assert_eq!(
            parse_one(r#""say \"hi\"""#),
            Value::Str("say \"hi\"".to_string())
        );
        assert_eq!(
            parse_one(r#""back\\slash\0""#),
            Value::Str("back\\slash\0".to_string())
        );
    }

    #[test]
    fn test_parse_sexpr_and_qexpr() {
        assert_eq!(
            parse_one("(+ 1 2)"),
            Value::Sexpr(vec![Value::Sym("+".to_string()), Value::Num(1), Value::Num(2)])
        );
        assert_eq!(
            parse_one("{1 {2 3}}"),
            Value::Qexpr(vec![
                Value::Num(1),
                Value::Qexpr(vec![Value::Num(2), Value::Num(3)]),
            ])
        );
        assert_eq!(parse_one("()"), Value::Sexpr(vec![]));
        assert_eq!(parse_one("{  }"), Value::Qexpr(vec![]));
    }

    #[test]
    fn test_comments_are_skipped() {
        let exprs = parse("; leading comment\n(+ 1 ; inline\n 2) ; trailing").unwrap();
        assert_eq!(exprs.len(), 1);
        assert_eq!(
            exprs[0],
            Value::Sexpr(vec![Value::Sym("+".to_string()), Value::Num(1), Value::Num(2)])
        );
    }

    #[test]
    fn test_multiple_top_level_expressions() {
        let exprs = parse("(def {x} 1)\nx").unwrap();
        assert_eq!(exprs.len(), 2);
        assert_eq!(exprs[1], Value::Sym("x".to_string()));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("").unwrap(), vec![]);
        assert_eq!(parse("  ; just a comment").unwrap(), vec![]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(")").is_err());
        assert!(parse("(1 2").is_err());
        assert!(parse(r#""unterminated"#).is_err());
    }

    #[test]
    fn test_print_then_parse_round_trips() {
        let original = Value::Qexpr(vec![
            Value::Sym("fun".to_string()),
            Value::Sexpr(vec![Value::Num(-3), Value::Str("a\tb".to_string())]),
            Value::Qexpr(vec![]),
        ]);
        let printed = original.to_string();
        assert_eq!(parse_one(&printed), original);
    }
}
