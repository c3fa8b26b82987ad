//! Source loading and output builtins: `load`, `print`, `error`.

use std::fs;

use crate::builtins::expect_len;
use crate::env::EnvRef;
use crate::error::LispError;
use crate::eval::eval;
use crate::parser;
use crate::value::Value;

/// Read, parse, and evaluate a source file in the current environment.
/// Errors from individual expressions are printed and evaluation continues
/// with the next one; an unreadable or unparsable file is an Error.
pub fn builtin_load(env: &EnvRef, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_len("load", &args, 1)?;
    let path = match args.remove(0) {
        Value::Str(path) => path,
        other => {
            return Err(LispError::WrongType {
                func: "load",
                got: other.type_name(),
                expected: "String",
            })
        }
    };

    let source = fs::read_to_string(&path)
        .map_err(|e| LispError::LoadFailed(format!("{}: {}", path, e)))?;
    let exprs = parser::parse(&source).map_err(LispError::LoadFailed)?;

    for expr in exprs {
        let result = eval(env, expr);
        if matches!(result, Value::Err(_)) {
            println!("{}", result);
        }
    }
    Ok(Value::unit())
}

/// Print the arguments separated by spaces, followed by a newline.
pub fn builtin_print(_env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    let line = args
        .iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", line);
    Ok(Value::unit())
}

/// Construct an Error value carrying the given message.
pub fn builtin_error(_env: &EnvRef, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_len("error", &args, 1)?;
    match args.remove(0) {
        Value::Str(message) => Err(LispError::Raised(message)),
        other => Err(LispError::WrongType {
            func: "error",
            got: other.type_name(),
            expected: "String",
        }),
    }
}

/// Register all I/O builtins in the environment.
pub fn register(env: &EnvRef) {
    let mut env = env.borrow_mut();
    env.put("load", Value::Builtin(builtin_load));
    env.put("print", Value::Builtin(builtin_print));
    env.put("error", Value::Builtin(builtin_error));
}
