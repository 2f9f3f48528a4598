//! Textual syntax for both value models.
//!
//! Interpreter values:
//!
//! ```text
//! u8:255   s8:-1   uN[128]:0xffff   sN[65]:-3   bits[4]:0b1010
//! enum u2:1        [u1:1, u1:0]     (u4:3, s8:-2)     fn main     token
//! ```
//!
//! Native values:
//!
//! ```text
//! bits[8]:0xff     bits[128]{0xffffffffffffffff, 1}     [bits[1]:1]     (bits[4]:3,)
//! ```
//!
//! `bits[N]{..}` lists raw words, least significant first. A non-negative
//! literal on a signed type is read as a raw pattern, so `s8:0xff` is `-1`.

use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint};
use thiserror::Error;
use vequiv_bits::{high_bits_clear, to_hex_string};

use crate::{InterpBits, InterpValue, NativeBits, NativeValue, Signedness};

/// Widest bit count accepted in text; wider types are a [`ParseError`].
pub const MAX_TEXT_BIT_COUNT: usize = 1 << 16;

/// Syntax error with the byte offset where it was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("at offset {offset}: {message}")]
pub struct ParseError {
    pub offset: usize,
    pub message: String,
}

/// Parse an interpreter value.
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed or out-of-range input.
pub fn parse_interp(src: &str) -> Result<InterpValue, ParseError> {
    let mut parser = Parser::new(src);
    let value = parser.interp_value()?;
    parser.finish()?;
    Ok(value)
}

/// Parse a native value.
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed or out-of-range input.
pub fn parse_native(src: &str) -> Result<NativeValue, ParseError> {
    let mut parser = Parser::new(src);
    let value = parser.native_value()?;
    parser.finish()?;
    Ok(value)
}

impl FromStr for InterpValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_interp(s)
    }
}

impl FromStr for NativeValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_native(s)
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    const fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn error<T>(&self, message: impl Into<String>) -> Result<T, ParseError> {
        Err(ParseError {
            offset: self.pos,
            message: message.into(),
        })
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.rest().chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<(), ParseError> {
        if self.eat(c) {
            Ok(())
        } else {
            self.error(format!("expected '{c}'"))
        }
    }

    fn finish(&mut self) -> Result<(), ParseError> {
        if self.peek().is_some() {
            return self.error("unexpected trailing input");
        }
        Ok(())
    }

    /// Identifier-like token: ASCII alphanumerics and `_`.
    fn word(&mut self) -> &'a str {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn width(&mut self) -> Result<usize, ParseError> {
        let start = self.pos;
        let digits = self.word();
        let width = digits.parse().map_err(|_| ParseError {
            offset: start,
            message: format!("invalid bit width {digits:?}"),
        })?;
        check_width(width, start)
    }

    /// `[N]` following `uN`, `sN` or `bits`.
    fn bracketed_width(&mut self) -> Result<usize, ParseError> {
        self.expect('[')?;
        let width = self.width()?;
        self.expect(']')?;
        Ok(width)
    }

    /// Optionally signed integer literal: decimal, `0x` hex or `0b` binary.
    fn literal(&mut self) -> Result<BigInt, ParseError> {
        let negative = self.eat('-');
        let start = self.pos;
        let token = self.word();
        let (digits, radix) = if let Some(hex) = token.strip_prefix("0x") {
            (hex, 16)
        } else if let Some(bin) = token.strip_prefix("0b") {
            (bin, 2)
        } else {
            (token, 10)
        };
        let digits: String = digits.chars().filter(|&c| c != '_').collect();
        let magnitude = BigUint::parse_bytes(digits.as_bytes(), radix).ok_or_else(|| ParseError {
            offset: start,
            message: format!("invalid integer literal {token:?}"),
        })?;
        let value = BigInt::from(magnitude);
        Ok(if negative { -value } else { value })
    }

    fn list<T>(
        &mut self,
        close: char,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                return Ok(items);
            }
            items.push(item(self)?);
            if !self.eat(',') {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }

    fn interp_value(&mut self) -> Result<InterpValue, ParseError> {
        if self.eat('[') {
            return self.list(']', Self::interp_value).map(InterpValue::Array);
        }
        if self.eat('(') {
            return self.list(')', Self::interp_value).map(InterpValue::Tuple);
        }

        match self.word() {
            "" => self.error("expected a value"),
            "token" => Ok(InterpValue::Token),
            "fn" => match self.word() {
                "" => self.error("expected a function name"),
                name => Ok(InterpValue::Function(name.to_string())),
            },
            "enum" => {
                let type_word = self.word();
                self.interp_bits(type_word).map(InterpValue::Enum)
            }
            type_word => self.interp_bits(type_word).map(InterpValue::Bits),
        }
    }

    /// Bits type (already consumed as `type_word`) followed by `:literal`.
    fn interp_bits(&mut self, type_word: &str) -> Result<InterpBits, ParseError> {
        let (signedness, width) = match type_word {
            "uN" | "bits" => (Signedness::Unsigned, self.bracketed_width()?),
            "sN" => (Signedness::Signed, self.bracketed_width()?),
            _ => {
                let signedness = match type_word.chars().next() {
                    Some('u') => Signedness::Unsigned,
                    Some('s') => Signedness::Signed,
                    _ => return self.error(format!("unknown type {type_word:?}")),
                };
                let start = self.pos - type_word.len();
                let width = type_word[1..]
                    .parse()
                    .or_else(|_| self.error(format!("unknown type {type_word:?}")))?;
                (signedness, check_width(width, start)?)
            }
        };
        self.expect(':')?;
        let start = self.pos;
        let value = self.literal()?;
        InterpBits::from_int(&value, width, signedness).map_err(|e| ParseError {
            offset: start,
            message: e.to_string(),
        })
    }

    fn native_value(&mut self) -> Result<NativeValue, ParseError> {
        if self.eat('[') {
            return self.list(']', Self::native_value).map(NativeValue::Array);
        }
        if self.eat('(') {
            return self.list(')', Self::native_value).map(NativeValue::Tuple);
        }

        match self.word() {
            "bits" => {}
            "" => return self.error("expected a value"),
            other => return self.error(format!("unknown native type {other:?}")),
        }
        let width = self.bracketed_width()?;
        let start = self.pos;
        let bits = if self.eat('{') {
            let words = self.list('}', |p| {
                let start = p.pos;
                let word = p.literal()?;
                u64::try_from(word).map_err(|_| ParseError {
                    offset: start,
                    message: "word does not fit in 64 bits".to_string(),
                })
            })?;
            NativeBits::from_words(words, width)
        } else {
            self.expect(':')?;
            let value = self.literal()?;
            NativeBits::from_int(&value, width)
        };
        bits.map(NativeValue::Bits).map_err(|e| ParseError {
            offset: start,
            message: e.to_string(),
        })
    }
}

fn check_width(width: usize, offset: usize) -> Result<usize, ParseError> {
    if width > MAX_TEXT_BIT_COUNT {
        return Err(ParseError {
            offset,
            message: format!("bit width {width} exceeds {MAX_TEXT_BIT_COUNT}"),
        });
    }
    Ok(width)
}

fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    open: char,
    close: char,
    items: &[T],
) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    // One-element tuples keep their trailing comma.
    if close == ')' && items.len() == 1 {
        write!(f, ",")?;
    }
    write!(f, "{close}")
}

impl fmt::Display for InterpBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}",
            self.signedness().prefix(),
            self.bit_count(),
            self.value_check_sign()
        )
    }
}

impl fmt::Display for InterpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits(bits) => write!(f, "{bits}"),
            Self::Enum(bits) => write!(f, "enum {bits}"),
            Self::Array(elements) => write_list(f, '[', ']', elements),
            Self::Tuple(members) => write_list(f, '(', ')', members),
            Self::Function(name) => write!(f, "fn {name}"),
            Self::Token => write!(f, "token"),
        }
    }
}

impl fmt::Display for NativeBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !high_bits_clear(self.words(), self.bit_count()) {
            write!(f, "bits[{}]{{", self.bit_count())?;
            for (i, word) in self.words().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{word:#x}")?;
            }
            return write!(f, "}}");
        }
        match to_hex_string(&self.to_int(false), self.bit_count()) {
            Ok(hex) => write!(f, "bits[{}]:{hex}", self.bit_count()),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl fmt::Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits(bits) => write!(f, "{bits}"),
            Self::Array(elements) => write_list(f, '[', ']', elements),
            Self::Tuple(members) => write_list(f, '(', ')', members),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp(src: &str) -> InterpValue {
        parse_interp(src).unwrap()
    }

    fn native(src: &str) -> NativeValue {
        parse_native(src).unwrap()
    }

    #[test]
    fn test_parse_interp_scalars() {
        assert_eq!(interp("u8:255"), InterpValue::ubits(255, 8).unwrap());
        assert_eq!(interp("s8:-1"), InterpValue::sbits(-1, 8).unwrap());
        assert_eq!(interp("s8:0xff"), InterpValue::sbits(-1, 8).unwrap());
        assert_eq!(interp("bits[4]:0b1010"), InterpValue::ubits(10, 4).unwrap());
        assert_eq!(interp(" uN[ 3 ] : 7 "), InterpValue::ubits(7, 3).unwrap());
        assert_eq!(
            interp("sN[64]:-9_223_372_036_854_775_808"),
            InterpValue::sbits(i64::MIN, 64).unwrap()
        );
    }

    #[test]
    fn test_parse_interp_wide() {
        let value = interp("uN[128]:0x1_ffff_ffff_ffff_ffff");
        let bits = value.as_bits().unwrap();
        assert_eq!(bits.bit_count(), 128);
        assert_eq!(bits.unsigned_value(), (BigInt::from(1) << 65) - 1);
    }

    #[test]
    fn test_parse_interp_other_variants() {
        assert!(interp("enum u2:1").is_enum());
        assert_eq!(interp("token"), InterpValue::Token);
        assert_eq!(interp("fn add_one"), InterpValue::Function("add_one".into()));
    }

    #[test]
    fn test_parse_interp_aggregates() {
        let value = interp("(u4:3, [u1:1, u1:0])");
        let expected = InterpValue::tuple(vec![
            InterpValue::ubits(3, 4).unwrap(),
            InterpValue::array(vec![
                InterpValue::ubits(1, 1).unwrap(),
                InterpValue::ubits(0, 1).unwrap(),
            ]),
        ]);
        assert_eq!(value, expected);
        assert_eq!(interp("[]"), InterpValue::array(vec![]));
        assert_eq!(interp("()"), InterpValue::tuple(vec![]));
        assert_eq!(interp("(u1:1,)"), InterpValue::tuple(vec![InterpValue::ubits(1, 1).unwrap()]));
    }

    #[test]
    fn test_parse_interp_errors() {
        assert!(parse_interp("").is_err());
        assert!(parse_interp("u8:256").is_err());
        assert!(parse_interp("u8:-1").is_err());
        assert!(parse_interp("q8:1").is_err());
        assert!(parse_interp("u8:1 u8:2").is_err());
        assert!(parse_interp("[u8:1").is_err());
        let err = parse_interp("u8:zz").unwrap_err();
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn test_parse_native() {
        assert_eq!(native("bits[8]:0xff"), NativeValue::ubits(0xff, 8).unwrap());
        assert_eq!(native("bits[8]:-1"), NativeValue::ubits(0xff, 8).unwrap());
        let wide = native("bits[128]{0xffffffffffffffff, 1}");
        assert_eq!(wide.as_bits().unwrap().words(), &[u64::MAX, 1]);
        let value = native("(bits[4]:3, [bits[1]:1, bits[1]:0])");
        assert_eq!(value.elements().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_native_errors() {
        assert!(parse_native("bits[128]{1}").is_err());
        assert!(parse_native("bits[8]:256").is_err());
        assert!(parse_native("u8:1").is_err());
        assert!(parse_native("bits[64]{0x1_0000_0000_0000_0000}").is_err());
    }

    #[test]
    fn test_oversized_widths_are_parse_errors() {
        let limit = format!("bits[{MAX_TEXT_BIT_COUNT}]:0");
        assert_eq!(native(&limit).as_bits().unwrap().bit_count(), MAX_TEXT_BIT_COUNT);

        let err = parse_native("bits[18446744073709551615]:0").unwrap_err();
        assert_eq!(err.offset, 5);
        assert!(err.message.contains("exceeds"), "{err}");
        assert!(parse_native(&format!("bits[{}]{{}}", MAX_TEXT_BIT_COUNT + 1)).is_err());
        assert!(parse_interp("uN[18446744073709551615]:0").is_err());
        let err = parse_interp("u99999999999:0").unwrap_err();
        assert_eq!(err.offset, 0);
        assert!(err.message.contains("exceeds"), "{err}");
        assert!(parse_interp("[u1:1, s70000:0]").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for src in ["u8:255", "s8:-1", "enum s4:-2", "[u1:1, u1:0]", "(u4:3,)", "fn f", "token"] {
            assert_eq!(interp(src).to_string(), src);
        }
        for src in ["bits[8]:0xff", "bits[65]:0x1ffffffffffffffff", "([bits[1]:0x1], ())"] {
            assert_eq!(native(src).to_string(), src);
        }
    }

    #[test]
    fn test_display_non_canonical_native() {
        let bits = NativeBits::from_words(vec![0x1ff], 8).unwrap();
        assert_eq!(bits.to_string(), "bits[8]{0x1ff}");
        assert_eq!(native("bits[8]{0x1ff}").to_string(), "bits[8]{0x1ff}");
    }
}
