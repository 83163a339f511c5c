//! Parser for the literal-list notation used by the genres/keywords/cast/crew columns.
//!
//! The cells look like `[{'id': 28, 'name': 'Action'}, {"id": 12, "name": "Adventure"}]`:
//! list/tuple/dict/set displays holding quoted strings, numbers, `True`,
//! `False` and `None`. Nothing is evaluated; anything else is a syntax error.

use crate::error::ExtractError;

/// Nesting limit, deeper input is rejected instead of overflowing the stack
const MAX_DEPTH: usize = 128;

/// Parsed literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
    Set(Vec<Literal>),
    /// Key/value pairs in source order
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    /// Short type name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::None => "None",
            Literal::Bool(_) => "bool",
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::Str(_) => "str",
            Literal::List(_) => "list",
            Literal::Tuple(_) => "tuple",
            Literal::Set(_) => "set",
            Literal::Dict(_) => "dict",
        }
    }

    /// Look up a string key in a dict
    ///
    /// Returns `None` for non-dicts as well as for absent keys.
    /// With duplicate keys the last one wins.
    pub fn get(&self, key: &str) -> Option<&Literal> {
        match self {
            Literal::Dict(pairs) => pairs
                .iter()
                .rev()
                .find(|(k, _)| matches!(k, Literal::Str(s) if s == key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Parse a complete literal; leading and trailing whitespace is allowed
pub fn parse(src: &str) -> Result<Literal, ExtractError> {
    let mut parser = Parser { src, pos: 0 };
    parser.skip_ws();
    let value = parser.value(0)?;
    parser.skip_ws();
    if parser.pos != src.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: &str) -> ExtractError {
        ExtractError::Syntax {
            offset: self.pos,
            message: message.to_string(),
        }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c') {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn value(&mut self, depth: usize) -> Result<Literal, ExtractError> {
        if depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        match self.peek() {
            Some('[') => {
                self.pos += 1;
                let (items, _) = self.items(']', depth)?;
                Ok(Literal::List(items))
            }
            Some('(') => {
                self.pos += 1;
                let (mut items, trailing_comma) = self.items(')', depth)?;
                // `(x)` is just x, `(x,)` is a tuple
                if items.len() == 1 && !trailing_comma {
                    Ok(items.remove(0))
                } else {
                    Ok(Literal::Tuple(items))
                }
            }
            Some('{') => {
                self.pos += 1;
                self.brace(depth)
            }
            Some(_) if self.at_string() => self.strings(),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => self.number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.name(),
            Some(_) => Err(self.error("unexpected character")),
            None => Err(self.error("unexpected end of input")),
        }
    }

    /// Comma separated values up to `close`, returns whether the last item had a trailing comma
    fn items(&mut self, close: char, depth: usize) -> Result<(Vec<Literal>, bool), ExtractError> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_ws();
            if self.eat(close) {
                return Ok((items, trailing_comma));
            }
            if !items.is_empty() && !trailing_comma {
                return Err(self.error("expected ',' between items"));
            }
            items.push(self.value(depth + 1)?);
            self.skip_ws();
            trailing_comma = self.eat(',');
        }
    }

    /// `{}` is an empty dict, `{k: v, ...}` a dict, `{a, b}` a set
    fn brace(&mut self, depth: usize) -> Result<Literal, ExtractError> {
        self.skip_ws();
        if self.eat('}') {
            return Ok(Literal::Dict(Vec::new()));
        }
        let first = self.value(depth + 1)?;
        self.skip_ws();
        if !self.eat(':') {
            self.skip_ws();
            let mut items = vec![first];
            if self.eat(',') {
                let (rest, _) = self.items('}', depth)?;
                items.extend(rest);
            } else if !self.eat('}') {
                return Err(self.error("expected ',' or '}' in set"));
            }
            return Ok(Literal::Set(items));
        }

        let mut pairs = Vec::new();
        let mut key = first;
        loop {
            self.skip_ws();
            let value = self.value(depth + 1)?;
            pairs.push((key, value));
            self.skip_ws();
            if self.eat('}') {
                return Ok(Literal::Dict(pairs));
            }
            if !self.eat(',') {
                return Err(self.error("expected ',' or '}' in dict"));
            }
            self.skip_ws();
            if self.eat('}') {
                return Ok(Literal::Dict(pairs));
            }
            key = self.value(depth + 1)?;
            self.skip_ws();
            if !self.eat(':') {
                return Err(self.error("expected ':' in dict"));
            }
        }
    }

    /// One string or several adjacent ones, which concatenate
    fn strings(&mut self) -> Result<Literal, ExtractError> {
        let mut out = String::new();
        loop {
            self.string(&mut out)?;
            let save = self.pos;
            self.skip_ws();
            if !self.at_string() {
                self.pos = save;
                return Ok(Literal::Str(out));
            }
        }
    }

    /// quote, or a `u`/`r` prefix directly followed by a quote
    fn at_string(&self) -> bool {
        let mut chars = self.src[self.pos..].chars();
        match chars.next() {
            Some('\'' | '"') => true,
            Some('u' | 'U' | 'r' | 'R') => matches!(chars.next(), Some('\'' | '"')),
            _ => false,
        }
    }

    fn string(&mut self, out: &mut String) -> Result<(), ExtractError> {
        let raw = matches!(self.peek(), Some('r' | 'R'));
        if matches!(self.peek(), Some('u' | 'U' | 'r' | 'R')) {
            self.pos += 1;
        }
        let quote = match self.bump() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.error("expected string")),
        };
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(()),
                // raw: backslash stays, but still shields the next char
                Some('\\') if raw => {
                    out.push('\\');
                    match self.bump() {
                        None | Some('\n') => return Err(self.error("unterminated string")),
                        Some(c) => out.push(c),
                    }
                }
                Some('\\') => self.escape(out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), ExtractError> {
        let c = self.bump().ok_or_else(|| self.error("unterminated string"))?;
        match c {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut code = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            self.pos += 1;
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code).ok_or_else(|| self.error("bad octal escape"))?);
            }
            'x' => out.push(self.hex_escape(2)?),
            'u' => out.push(self.hex_escape(4)?),
            'U' => out.push(self.hex_escape(8)?),
            // unknown escapes are kept verbatim
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn hex_escape(&mut self, digits: usize) -> Result<char, ExtractError> {
        let end = self.pos + digits;
        let hex = self
            .src
            .get(self.pos..end)
            .filter(|h| h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| self.error("truncated hex escape"))?;
        let code = u32::from_str_radix(hex, 16).map_err(|_| self.error("bad hex escape"))?;
        let c = char::from_u32(code).ok_or_else(|| self.error("invalid code point"))?;
        self.pos = end;
        Ok(c)
    }

    fn number(&mut self) -> Result<Literal, ExtractError> {
        let start = self.pos;
        let mut negative = false;
        if let Some(sign @ ('-' | '+')) = self.peek() {
            negative = sign == '-';
            self.pos += 1;
            self.skip_ws();
        }
        let digits_start = self.pos;
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' | '_' => self.pos += 1,
                '.' => {
                    is_float = true;
                    self.pos += 1;
                }
                'e' | 'E' => {
                    is_float = true;
                    self.pos += 1;
                    if matches!(self.peek(), Some('-' | '+')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        let text: String = self.src[digits_start..self.pos].chars().filter(|&c| c != '_').collect();
        if !text.chars().any(|c| c.is_ascii_digit()) {
            self.pos = start;
            return Err(self.error("invalid number"));
        }
        // 007 は不可、00 と 007.5 は可
        if !is_float && text.starts_with('0') && text.chars().any(|c| c != '0') {
            self.pos = start;
            return Err(self.error("leading zeros in integer"));
        }
        let literal = if is_float {
            let v: f64 = text.parse().map_err(|_| self.error("invalid float"))?;
            Literal::Float(if negative { -v } else { v })
        } else {
            match text.parse::<i64>() {
                Ok(v) => Literal::Int(if negative { -v } else { v }),
                // beyond i64, keep the magnitude
                Err(_) => {
                    let v: f64 = text.parse().map_err(|_| self.error("invalid integer"))?;
                    Literal::Float(if negative { -v } else { v })
                }
            }
        };
        Ok(literal)
    }

    fn name(&mut self) -> Result<Literal, ExtractError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        match &self.src[start..self.pos] {
            "None" => Ok(Literal::None),
            "True" => Ok(Literal::Bool(true)),
            "False" => Ok(Literal::Bool(false)),
            _ => {
                self.pos = start;
                Err(self.error("names are not literals"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Literal {
        Literal::Str(v.to_string())
    }

    #[test]
    fn parses_mixed_quote_list_of_dicts() {
        let lit = parse(r#"[{'id': 28, "name": "Action"}, {'id': 12, 'name': 'Adventure'}]"#).unwrap();
        let Literal::List(items) = lit else { panic!("expected list") };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].get("name"), Some(&s("Action")));
        assert_eq!(items[0].get("id"), Some(&Literal::Int(28)));
        assert_eq!(items[1].get("name").and_then(Literal::as_str), Some("Adventure"));
    }

    #[test]
    fn parses_scalars() {
        assert_eq!(parse("None").unwrap(), Literal::None);
        assert_eq!(parse(" True ").unwrap(), Literal::Bool(true));
        assert_eq!(parse("-3").unwrap(), Literal::Int(-3));
        assert_eq!(parse("1.5e2").unwrap(), Literal::Float(150.0));
        assert_eq!(parse("'a' \"b\"").unwrap(), s("ab"));
    }

    #[test]
    fn tuples_and_parentheses() {
        assert_eq!(parse("(1)").unwrap(), Literal::Int(1));
        assert_eq!(parse("(1,)").unwrap(), Literal::Tuple(vec![Literal::Int(1)]));
        assert_eq!(parse("()").unwrap(), Literal::Tuple(vec![]));
    }

    #[test]
    fn braces_make_dicts_and_sets() {
        assert_eq!(parse("{}").unwrap(), Literal::Dict(vec![]));
        assert_eq!(parse("{1, 2,}").unwrap(), Literal::Set(vec![Literal::Int(1), Literal::Int(2)]));
        assert_eq!(
            parse("{'a': 1, 'a': 2,}").unwrap().get("a"),
            Some(&Literal::Int(2))
        );
    }

    #[test]
    fn escapes() {
        assert_eq!(parse(r"'it\'s'").unwrap(), s("it's"));
        assert_eq!(parse(r#""café \x41\n""#).unwrap(), s("café A\n"));
        assert_eq!(parse(r"'\d'").unwrap(), s("\\d"));
        assert_eq!(parse("'Am\u{e9}lie'").unwrap(), s("Amélie"));
    }

    #[test]
    fn signs_and_zeros() {
        assert_eq!(parse("- 4").unwrap(), Literal::Int(-4));
        assert_eq!(parse("+4").unwrap(), Literal::Int(4));
        assert_eq!(parse("0").unwrap(), Literal::Int(0));
        assert_eq!(parse("00").unwrap(), Literal::Int(0));
        assert_eq!(parse("007.5").unwrap(), Literal::Float(7.5));
        assert_eq!(parse("0.25").unwrap(), Literal::Float(0.25));
    }

    #[test]
    fn string_prefixes() {
        assert_eq!(parse("u'Drama'").unwrap(), s("Drama"));
        assert_eq!(parse(r#"U"Drama""#).unwrap(), s("Drama"));
        assert_eq!(parse(r"r'\d\''").unwrap(), s(r"\d\'"));
        assert_eq!(parse("u'Sci' 'ence'").unwrap(), s("Science"));
        assert_eq!(
            parse("[{'id': 18, 'name': u'Drama'}]").unwrap(),
            Literal::List(vec![Literal::Dict(vec![(s("id"), Literal::Int(18)), (s("name"), s("Drama"))])])
        );
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in [
            "", "[", "[1 2]", "{'a' 1}", "'open", "[foo]", "[1]]", "{'a': 1", "nan", "-", "--1", "+-2", "007",
            "[{'id': 012}]", "b'x'", "f'x'",
        ] {
            assert!(
                matches!(parse(bad), Err(ExtractError::Syntax { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn rejects_runaway_nesting() {
        let deep = "[".repeat(MAX_DEPTH + 10) + &"]".repeat(MAX_DEPTH + 10);
        assert!(parse(&deep).is_err());
    }
}
