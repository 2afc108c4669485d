//! Stub command block evaluation
//!
//! A stub may open with a command block such as
//!
//! ```text
//! {{{
//! exports({ to: app.configPath(string.snakeCase(entity.name) + '.ts') })
//! }}}
//! ```
//!
//! The block is parsed with a closed expression grammar and evaluated without
//! any I/O. Supported forms:
//!
//! - string, number, `true`/`false`/`null` literals
//! - object and array literals, trailing commas allowed
//! - dotted lookups into the template data (`entity.name`)
//! - `+` string concatenation
//! - `app.makePath(...)` and `app.<directory>Path(...)` path builders
//! - `string.camelCase(...)` and the other case helpers
//!
//! The whole block must be a single `exports({...})` call.

use std::path::PathBuf;

use serde_json::{Map, Number, Value};

use crate::common::string_utils;
use crate::project::Project;

/// Evaluated `exports({...})` call
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    /// Absolute destination of the rendered stub
    pub to: PathBuf,
    /// Overwrite an existing destination
    pub force: bool,
    /// Every other key, passed through untouched
    pub extra: Map<String, Value>,
}

impl Directive {
    pub fn new(to: impl Into<PathBuf>) -> Self {
        Self {
            to: to.into(),
            force: false,
            extra: Map::new(),
        }
    }

    fn from_exports(mut object: Map<String, Value>, project: &Project) -> Result<Self, String> {
        let to = match object.remove("to") {
            Some(Value::String(to)) if !to.trim().is_empty() => to,
            Some(Value::String(_)) => return Err("\"to\" cannot be empty".to_string()),
            Some(other) => return Err(format!("\"to\" must be a string, got {}", type_name(&other))),
            None => return Err("exports() is missing the \"to\" destination".to_string()),
        };
        let force = match object.remove("force") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(force)) => force,
            Some(other) => {
                return Err(format!("\"force\" must be a boolean, got {}", type_name(&other)));
            }
        };

        Ok(Self {
            to: project.root.join(to),
            force,
            extra: object,
        })
    }
}

/// Parse and evaluate a command block against the project and template data
pub fn evaluate(source: &str, project: &Project, data: &Map<String, Value>) -> Result<Directive, String> {
    let tokens = tokenize(source)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expr()?;
    parser.eat(&Token::Punct(';'));
    if let Some(token) = parser.peek() {
        return Err(format!("unexpected {} after exports() call", token.describe()));
    }

    let argument = match expr {
        Expr::Call { callee, mut args } if callee == ["exports"] => {
            if args.len() != 1 {
                return Err(format!("exports() expects one argument, got {}", args.len()));
            }
            args.remove(0)
        }
        _ => return Err("the command block must be a single exports({...}) call".to_string()),
    };

    let scope = Scope { project, data };
    match scope.eval(&argument)? {
        Value::Object(object) => Directive::from_exports(object, project),
        other => Err(format!("exports() expects an object, got {}", type_name(&other))),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Num(Value),
    Punct(char),
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Ident(name) => format!("identifier '{}'", name),
            Token::Str(value) => format!("string '{}'", value),
            Token::Num(value) => format!("number {}", value),
            Token::Punct(c) => format!("'{}'", c),
        }
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c == '/' && chars.get(i + 1) == Some(&'/') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
        } else if matches!(c, '\'' | '"' | '`') {
            let (value, next) = read_string(&chars, i)?;
            tokens.push(Token::Str(value));
            i = next;
        } else if c.is_ascii_digit() || (c == '-' && chars.get(i + 1).is_some_and(char::is_ascii_digit)) {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            tokens.push(Token::Num(parse_number(&literal)?));
        } else if c.is_alphabetic() || c == '_' || c == '$' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '$') {
                i += 1;
            }
            tokens.push(Token::Ident(chars[start..i].iter().collect()));
        } else if "(){}[],:.+;".contains(c) {
            tokens.push(Token::Punct(c));
            i += 1;
        } else {
            return Err(format!("unexpected character '{}'", c));
        }
    }

    Ok(tokens)
}

fn read_string(chars: &[char], start: usize) -> Result<(String, usize), String> {
    let quote = chars[start];
    let mut value = String::new();
    let mut i = start + 1;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let escaped = chars.get(i + 1).ok_or("unterminated string literal")?;
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => *other,
                });
                i += 2;
            }
            c if c == quote => return Ok((value, i + 1)),
            c => {
                value.push(c);
                i += 1;
            }
        }
    }

    Err("unterminated string literal".to_string())
}

fn parse_number(literal: &str) -> Result<Value, String> {
    if literal.contains('.') {
        literal
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| format!("invalid number '{}'", literal))
    } else {
        literal
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("invalid number '{}'", literal))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Literal(Value),
    Object(Vec<(String, Expr)>),
    Array(Vec<Expr>),
    Lookup(Vec<String>),
    Call { callee: Vec<String>, args: Vec<Expr> },
    Concat(Vec<Expr>),
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token, String> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or("unexpected end of command block")?;
        self.pos += 1;
        Ok(token)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, punct: char) -> Result<(), String> {
        let token = self.next()?;
        if token == Token::Punct(punct) {
            Ok(())
        } else {
            Err(format!("expected '{}', found {}", punct, token.describe()))
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, String> {
        let mut terms = vec![self.parse_term()?];
        while self.eat(&Token::Punct('+')) {
            terms.push(self.parse_term()?);
        }
        if terms.len() == 1 {
            Ok(terms.remove(0))
        } else {
            Ok(Expr::Concat(terms))
        }
    }

    fn parse_term(&mut self) -> Result<Expr, String> {
        match self.next()? {
            Token::Str(value) => Ok(Expr::Literal(Value::String(value))),
            Token::Num(value) => Ok(Expr::Literal(value)),
            Token::Punct('{') => self.parse_object(),
            Token::Punct('[') => Ok(Expr::Array(self.parse_list(']')?)),
            Token::Punct('(') => {
                let inner = self.parse_expr()?;
                self.expect(')')?;
                Ok(inner)
            }
            Token::Ident(name) => match name.as_str() {
                "true" => Ok(Expr::Literal(Value::Bool(true))),
                "false" => Ok(Expr::Literal(Value::Bool(false))),
                "null" | "undefined" => Ok(Expr::Literal(Value::Null)),
                _ => self.parse_path(name),
            },
            other => Err(format!("unexpected {}", other.describe())),
        }
    }

    fn parse_path(&mut self, first: String) -> Result<Expr, String> {
        let mut segments = vec![first];
        while self.eat(&Token::Punct('.')) {
            match self.next()? {
                Token::Ident(name) => segments.push(name),
                other => return Err(format!("expected a property name, found {}", other.describe())),
            }
        }
        if self.eat(&Token::Punct('(')) {
            let args = self.parse_list(')')?;
            Ok(Expr::Call {
                callee: segments,
                args,
            })
        } else {
            Ok(Expr::Lookup(segments))
        }
    }

    fn parse_object(&mut self) -> Result<Expr, String> {
        let mut entries = Vec::new();
        loop {
            if self.eat(&Token::Punct('}')) {
                break;
            }
            let key = match self.next()? {
                Token::Ident(key) | Token::Str(key) => key,
                other => return Err(format!("expected an object key, found {}", other.describe())),
            };
            self.expect(':')?;
            entries.push((key, self.parse_expr()?));
            if !self.eat(&Token::Punct(',')) {
                self.expect('}')?;
                break;
            }
        }
        Ok(Expr::Object(entries))
    }

    /// Comma separated expressions up to `close`
    fn parse_list(&mut self, close: char) -> Result<Vec<Expr>, String> {
        let mut items = Vec::new();
        loop {
            if self.eat(&Token::Punct(close)) {
                break;
            }
            items.push(self.parse_expr()?);
            if !self.eat(&Token::Punct(',')) {
                self.expect(close)?;
                break;
            }
        }
        Ok(items)
    }
}

struct Scope<'a> {
    project: &'a Project,
    data: &'a Map<String, Value>,
}

impl Scope<'_> {
    fn eval(&self, expr: &Expr) -> Result<Value, String> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Object(entries) => entries
                .iter()
                .map(|(key, value)| Ok((key.clone(), self.eval(value)?)))
                .collect::<Result<Map<_, _>, String>>()
                .map(Value::Object),
            Expr::Array(items) => items
                .iter()
                .map(|item| self.eval(item))
                .collect::<Result<Vec<_>, String>>()
                .map(Value::Array),
            Expr::Lookup(path) => self.lookup(path),
            Expr::Concat(terms) => terms
                .iter()
                .map(|term| self.eval(term).and_then(|v| to_text(&v)))
                .collect::<Result<String, String>>()
                .map(Value::String),
            Expr::Call { callee, args } => self.call(callee, args),
        }
    }

    fn lookup(&self, path: &[String]) -> Result<Value, String> {
        let mut current = self
            .data
            .get(&path[0])
            .ok_or_else(|| format!("unknown identifier '{}'", path[0]))?;
        for segment in &path[1..] {
            current = current
                .get(segment)
                .ok_or_else(|| format!("'{}' has no property '{}'", path[0], segment))?;
        }
        Ok(current.clone())
    }

    fn call(&self, callee: &[String], args: &[Expr]) -> Result<Value, String> {
        let args = args
            .iter()
            .map(|arg| self.eval(arg).and_then(|v| to_text(&v)))
            .collect::<Result<Vec<String>, String>>()?;

        match callee {
            [object, helper] if object == "app" => self.path_helper(helper, &args),
            [object, helper] if object == "string" => {
                let [value] = args.as_slice() else {
                    return Err(format!("string.{}() expects one argument", helper));
                };
                case_helper(helper, value)
            }
            [name] if name == "exports" => {
                Err("exports() can only be called once, at the top level".to_string())
            }
            _ => Err(format!("unknown function '{}'", callee.join("."))),
        }
    }

    fn path_helper(&self, helper: &str, args: &[String]) -> Result<Value, String> {
        let path = if helper == "makePath" {
            Some(self.project.make_path(args))
        } else {
            helper
                .strip_suffix("Path")
                .and_then(|dir| self.project.directory_path(dir, args))
        };
        path.map(|p| Value::String(p.to_string_lossy().into_owned()))
            .ok_or_else(|| format!("unknown path helper 'app.{}'", helper))
    }
}

fn case_helper(helper: &str, value: &str) -> Result<Value, String> {
    let converted = match helper {
        "camelCase" => string_utils::camel_case(value),
        "pascalCase" => string_utils::pascal_case(value),
        "snakeCase" => string_utils::snake_case(value),
        "dashCase" => string_utils::dash_case(value),
        "titleCase" => string_utils::title_case(value),
        _ => return Err(format!("unknown string helper 'string.{}'", helper)),
    };
    Ok(Value::String(converted))
}

fn to_text(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("cannot use {} as text", type_name(other))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;

    fn project() -> Project {
        Project::with_defaults("/app")
    }

    fn data(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_config_path_destination() {
        let directive =
            evaluate("exports({ to: app.configPath('cors.ts') })", &project(), &Map::new()).unwrap();
        assert_eq!(directive.to, Path::new("/app/config/cors.ts"));
        assert!(!directive.force);
        assert!(directive.extra.is_empty());
    }

    #[test]
    fn test_relative_destination_joins_root() {
        let directive = evaluate("exports({ to: 'config/cors.ts' })", &project(), &Map::new()).unwrap();
        assert_eq!(directive.to, Path::new("/app/config/cors.ts"));
    }

    #[test]
    fn test_entity_lookup_and_case_helpers() {
        let source = r#"
            exports({
              to: app.makePath('app', 'models', entity.path, string.snakeCase(entity.name) + '.ts'),
              force: true,
            });
        "#;
        let ctx = data(json!({ "entity": { "path": "admin", "name": "UserProfile" } }));
        let directive = evaluate(source, &project(), &ctx).unwrap();
        assert_eq!(directive.to, Path::new("/app/app/models/admin/user_profile.ts"));
        assert!(directive.force);
    }

    #[test]
    fn test_extra_keys_pass_through() {
        let source = "exports({ to: 'a.ts', reloadServer: false, tags: ['x', 1] })";
        let directive = evaluate(source, &project(), &Map::new()).unwrap();
        assert_eq!(directive.extra.get("reloadServer"), Some(&Value::Bool(false)));
        assert_eq!(directive.extra.get("tags"), Some(&json!(["x", 1])));
    }

    #[test]
    fn test_directory_helpers_follow_config() {
        let mut project = project();
        project
            .config
            .directories
            .insert("views".to_string(), "templates".to_string());
        let directive =
            evaluate("exports({ to: app.viewsPath('home.edge') })", &project, &Map::new()).unwrap();
        assert_eq!(directive.to, Path::new("/app/templates/home.edge"));
    }

    #[test]
    fn test_missing_to_rejected() {
        let err = evaluate("exports({ force: true })", &project(), &Map::new()).unwrap_err();
        assert!(err.contains("\"to\""));
    }

    #[test]
    fn test_non_boolean_force_rejected() {
        let err = evaluate("exports({ to: 'a', force: 'yes' })", &project(), &Map::new()).unwrap_err();
        assert_eq!(err, "\"force\" must be a boolean, got a string");
    }

    #[test]
    fn test_must_be_single_exports_call() {
        assert!(evaluate("module({ to: 'a' })", &project(), &Map::new()).is_err());
        assert!(evaluate("exports({ to: 'a' }) exports({ to: 'b' })", &project(), &Map::new()).is_err());
        assert!(evaluate("exports('a')", &project(), &Map::new()).is_err());
    }

    #[test]
    fn test_unknown_identifier_and_helper() {
        let err = evaluate("exports({ to: entity.name })", &project(), &Map::new()).unwrap_err();
        assert_eq!(err, "unknown identifier 'entity'");

        let err = evaluate("exports({ to: app.nopePath('a') })", &project(), &Map::new()).unwrap_err();
        assert!(err.contains("app.nopePath"));

        let err = evaluate("exports({ to: process.env('HOME') })", &project(), &Map::new()).unwrap_err();
        assert!(err.contains("unknown function 'process.env'"));
    }

    #[test]
    fn test_syntax_errors() {
        assert!(evaluate("exports({ to: 'a' ", &project(), &Map::new()).is_err());
        assert!(evaluate("exports({ to: 'a }) ", &project(), &Map::new()).is_err());
        assert!(evaluate("exports({ to: 'a' } @", &project(), &Map::new()).is_err());
    }
}
