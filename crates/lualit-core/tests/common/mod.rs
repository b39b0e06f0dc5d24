//! Test-local stand-in for the external Lua parser.
//!
//! Roundtrip tests need to feed `deserialize` the same tree shape the real
//! collaborator (a luaparse-style parser) would produce. This module parses
//! exactly the literal subset the serializer emits — nil, booleans, numbers,
//! strings with backslash-escaped quotes, unary minus, and table
//! constructors — and builds luaparse-shaped AST nodes as JSON. It is not a
//! general Lua parser and panics on anything else, which is what we want in
//! tests.

use serde_json::{json, Value as Json};

/// Parse a `return <literal>` chunk into a luaparse-shaped AST.
pub fn parse_chunk(src: &str) -> Json {
    let mut parser = Parser {
        chars: src.chars().collect(),
        pos: 0,
    };
    parser.skip_ws();
    let keyword = parser.take_ident();
    assert_eq!(keyword, "return", "chunk must start with `return`");
    let expr = parser.parse_expr();
    parser.skip_ws();
    assert_eq!(parser.peek(), None, "trailing input after the literal");
    json!({
        "type": "Chunk",
        "body": [{ "type": "ReturnStatement", "arguments": [expr] }]
    })
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> char {
        let c = self.chars[self.pos];
        self.pos += 1;
        c
    }

    fn expect(&mut self, want: char) {
        let got = self.bump();
        assert_eq!(got, want, "expected `{want}` at offset {}", self.pos - 1);
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn take_ident(&mut self) -> String {
        let mut name = String::new();
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            name.push(self.bump());
        }
        name
    }

    fn parse_expr(&mut self) -> Json {
        self.skip_ws();
        match self.peek() {
            Some('{') => self.parse_table(),
            Some('\'') | Some('"') => self.parse_string(),
            Some('-') => {
                self.bump();
                let argument = self.parse_expr();
                json!({ "type": "UnaryExpression", "operator": "-", "argument": argument })
            }
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            _ => self.parse_keyword(),
        }
    }

    fn parse_keyword(&mut self) -> Json {
        let name = self.take_ident();
        match name.as_str() {
            "nil" => json!({ "type": "NilLiteral" }),
            "true" => json!({ "type": "BooleanLiteral", "value": true }),
            "false" => json!({ "type": "BooleanLiteral", "value": false }),
            _ => json!({ "type": "Identifier", "name": name }),
        }
    }

    fn parse_number(&mut self) -> Json {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        let value: f64 = text.parse().expect("numeric literal");
        json!({ "type": "NumericLiteral", "value": value, "raw": text })
    }

    fn parse_string(&mut self) -> Json {
        let quote = self.bump();
        let mut text = String::new();
        loop {
            let c = self.bump();
            if c == '\\' {
                text.push(self.bump());
            } else if c == quote {
                break;
            } else {
                text.push(c);
            }
        }
        let raw = format!("{quote}{text}{quote}");
        json!({ "type": "StringLiteral", "value": text, "raw": raw })
    }

    fn parse_table(&mut self) -> Json {
        self.expect('{');
        let mut fields = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.bump();
                break;
            }
            fields.push(self.parse_field());
            self.skip_ws();
            if self.peek() == Some(',') {
                self.bump();
            }
        }
        json!({ "type": "TableConstructorExpression", "fields": fields })
    }

    fn parse_field(&mut self) -> Json {
        self.skip_ws();
        if self.peek() == Some('[') {
            self.bump();
            let key = self.parse_expr();
            self.skip_ws();
            self.expect(']');
            self.skip_ws();
            self.expect('=');
            let value = self.parse_expr();
            return json!({ "type": "TableKey", "key": key, "value": value });
        }
        // An identifier followed by `=` is a bare-keyed entry; anything else
        // rewinds and parses as a plain element.
        let checkpoint = self.pos;
        if matches!(self.peek(), Some(c) if c.is_ascii_alphabetic() || c == '_') {
            let name = self.take_ident();
            self.skip_ws();
            if self.peek() == Some('=') {
                self.bump();
                let value = self.parse_expr();
                return json!({
                    "type": "TableKeyString",
                    "key": { "type": "Identifier", "name": name },
                    "value": value
                });
            }
            self.pos = checkpoint;
        }
        let value = self.parse_expr();
        json!({ "type": "TableValue", "value": value })
    }
}
