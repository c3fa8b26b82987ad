// ABOUTME: Value types representing qlisp data: atoms, expressions, and functions

use crate::env::{Env, EnvRef};
use crate::error::LispError;
use std::fmt;

/// Signature shared by every builtin: the calling environment and the
/// already-evaluated argument list (the S-expression minus its head).
pub type BuiltinFn = fn(&EnvRef, Vec<Value>) -> Result<Value, LispError>;

/// A runtime value. S-expressions are evaluable lists; Q-expressions are
/// inert data lists until `eval` retags them. Errors are values too and
/// propagate through S-expression reduction rather than unwinding.
#[derive(Debug, Clone)]
pub enum Value {
    Num(i64),
    Err(LispError),
    Sym(String),
    Str(String),
    Sexpr(Vec<Value>),
    Qexpr(Vec<Value>),
    Builtin(BuiltinFn),
    Lambda(Box<Lambda>),
}

/// A user-defined function: remaining formal names, the body as the
/// children of its Q-expression, and the captured environment that
/// accumulates bindings across partial applications.
#[derive(Debug)]
pub struct Lambda {
    pub formals: Vec<String>,
    pub body: Vec<Value>,
    pub env: EnvRef,
}

impl Clone for Lambda {
    fn clone(&self) -> Self {
        // A lambda owns its captured environment, so copying the lambda
        // copies the environment's bindings as well.
        Lambda {
            formals: self.formals.clone(),
            body: self.body.clone(),
            env: Env::duplicate(&self.env),
        }
    }
}

impl PartialEq for Lambda {
    fn eq(&self, other: &Self) -> bool {
        // Captured environments are not part of a function's identity.
        self.formals == other.formals && self.body == other.body
    }
}

impl Value {
    /// The type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Num(_) => "Number",
            Value::Err(_) => "Error",
            Value::Sym(_) => "Symbol",
            Value::Str(_) => "String",
            Value::Sexpr(_) => "S-Expression",
            Value::Qexpr(_) => "Q-Expression",
            Value::Builtin(_) | Value::Lambda(_) => "Function",
        }
    }

    /// The empty S-expression, doubling as the unit result of `def`,
    /// `print`, and friends.
    pub fn unit() -> Value {
        Value::Sexpr(Vec::new())
    }
}

impl From<LispError> for Value {
    fn from(err: LispError) -> Self {
        Value::Err(err)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Err(a), Value::Err(b)) => a == b,
            (Value::Sym(a), Value::Sym(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Sexpr(a), Value::Sexpr(b)) => a == b,
            (Value::Qexpr(a), Value::Qexpr(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => std::ptr::fn_addr_eq(*a, *b),
            (Value::Lambda(a), Value::Lambda(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{}", n),
            Value::Err(e) => write!(f, "Error: {}", e),
            Value::Sym(s) => write!(f, "{}", s),
            Value::Str(s) => write!(f, "\"{}\"", escape(s)),
            Value::Sexpr(items) => write_seq(f, items, '(', ')'),
            Value::Qexpr(items) => write_seq(f, items, '{', '}'),
            Value::Builtin(_) => write!(f, "<builtin>"),
            Value::Lambda(lam) => {
                write!(f, "(\\ {{")?;
                for (i, name) in lam.formals.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", name)?;
                }
                write!(f, "}} ")?;
                write_seq(f, &lam.body, '{', '}')?;
                write!(f, ")")
            }
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Value], open: char, close: char) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "{}", close)
}

/// Re-escape string contents for printing; the inverse of the escape
/// decoding the parser performs.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\x0b' => out.push_str("\\v"),
            _ => out.push(c),
        }
    }
    out
}
