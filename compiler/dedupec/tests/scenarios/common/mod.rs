//! Evaluator for emitted snippets.
//!
//! Understands exactly the subset of the target language the emitter
//! produces: JSON literals, identifiers, `(name/*: any*/)` and
//! `([]/*: any*/)` casts, and the `(function(){ var ...; return ...; })()`
//! wrapper. Anything else is a test failure.

use std::collections::HashMap;

use serde_json::{Map, Value as Json};

/// Result of evaluating one snippet.
#[derive(Debug)]
pub struct Evaluated {
    pub value: Json,
    /// Binding names in declaration order.
    pub bindings: Vec<String>,
    /// How often each binding is read, across declarations and the return
    /// expression.
    pub references: HashMap<String, usize>,
    /// For each binding, the bindings its right-hand side reads.
    pub dependencies: HashMap<String, Vec<String>>,
}

/// Evaluate `text`, panicking with a position on anything unexpected.
pub fn evaluate(text: &str) -> Evaluated {
    let mut parser = Parser {
        src: text,
        pos: 0,
        env: HashMap::new(),
        references: HashMap::new(),
        reads: Vec::new(),
    };
    let mut bindings = Vec::new();
    let mut dependencies = HashMap::new();

    let value = if parser.eat("(function(){") {
        parser.expect("var");
        loop {
            parser.skip_ws();
            let name = parser.ident();
            parser.expect("=");
            parser.reads.clear();
            let value = parser.expr();
            assert!(
                !parser.env.contains_key(&name),
                "binding {name} declared twice"
            );
            dependencies.insert(name.clone(), std::mem::take(&mut parser.reads));
            parser.env.insert(name.clone(), value);
            bindings.push(name);
            if parser.eat(";") {
                break;
            }
            parser.expect(",");
        }
        parser.expect("return");
        let value = parser.expr();
        parser.expect(";");
        parser.expect("})()");
        value
    } else {
        parser.expr()
    };
    parser.skip_ws();
    assert_eq!(parser.pos, text.len(), "trailing input: {:?}", parser.rest());

    Evaluated {
        value,
        bindings,
        references: parser.references,
        dependencies,
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    env: HashMap<String, Json>,
    references: HashMap<String, usize>,
    reads: Vec<String>,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) {
        assert!(
            self.eat(token),
            "expected {token:?} at byte {}, found {:?}",
            self.pos,
            self.rest().chars().take(20).collect::<String>()
        );
    }

    fn ident(&mut self) -> String {
        self.skip_ws();
        let len = self
            .rest()
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(self.rest().len());
        assert!(len > 0, "expected identifier at byte {}", self.pos);
        let name = self.rest()[..len].to_string();
        self.pos += len;
        name
    }

    fn lookup(&mut self, name: String) -> Json {
        let value = self
            .env
            .get(&name)
            .unwrap_or_else(|| panic!("{name} read before its declaration"))
            .clone();
        *self.references.entry(name.clone()).or_insert(0) += 1;
        self.reads.push(name);
        value
    }

    fn expr(&mut self) -> Json {
        self.skip_ws();
        if self.eat("([]/*: any*/)") {
            return Json::Array(Vec::new());
        }
        if self.eat("(") {
            let name = self.ident();
            self.expect("/*: any*/)");
            return self.lookup(name);
        }
        let first = self.rest().chars().next();
        match first {
            Some('[') => self.array(),
            Some('{') => self.object(),
            Some('"') => Json::String(self.string()),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number(),
            _ => {
                let word = self.ident();
                match word.as_str() {
                    "null" => Json::Null,
                    "true" => Json::Bool(true),
                    "false" => Json::Bool(false),
                    _ => self.lookup(word),
                }
            }
        }
    }

    fn array(&mut self) -> Json {
        self.expect("[");
        let mut items = Vec::new();
        if self.eat("]") {
            return Json::Array(items);
        }
        loop {
            items.push(self.expr());
            if self.eat("]") {
                return Json::Array(items);
            }
            self.expect(",");
        }
    }

    fn object(&mut self) -> Json {
        self.expect("{");
        let mut map = Map::new();
        if self.eat("}") {
            return Json::Object(map);
        }
        loop {
            self.skip_ws();
            let key = self.string();
            self.expect(":");
            let value = self.expr();
            map.insert(key, value);
            if self.eat("}") {
                return Json::Object(map);
            }
            self.expect(",");
        }
    }

    fn string(&mut self) -> String {
        let bytes = self.rest().as_bytes();
        assert_eq!(bytes.first(), Some(&b'"'), "expected string at byte {}", self.pos);
        let mut end = 1;
        while bytes[end] != b'"' {
            end += if bytes[end] == b'\\' { 2 } else { 1 };
        }
        let literal = &self.rest()[..=end];
        let value = serde_json::from_str(literal).unwrap();
        self.pos += end + 1;
        value
    }

    fn number(&mut self) -> Json {
        let len = self
            .rest()
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')))
            .unwrap_or(self.rest().len());
        let literal = &self.rest()[..len];
        let value = serde_json::from_str(literal).unwrap();
        self.pos += len;
        value
    }
}
