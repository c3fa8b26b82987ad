//! List builtins operating on Q-expressions: `list`, `head`, `tail`,
//! `join`, and `eval`, which retags a Q-expression as an S-expression and
//! hands it back to the evaluator.

use crate::builtins::{expect_len, expect_qexpr};
use crate::env::EnvRef;
use crate::error::LispError;
use crate::eval;
use crate::value::Value;

/// Retag the argument list itself as a Q-expression.
pub fn builtin_list(_env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    Ok(Value::Qexpr(args))
}

/// A Q-expression containing only the first element.
pub fn builtin_head(_env: &EnvRef, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_len("head", &args, 1)?;
    let mut items = match args.remove(0) {
        Value::Qexpr(items) => items,
        other => {
            return Err(LispError::WrongTypeAt {
                func: "head",
                pos: 0,
                got: other.type_name(),
                expected: "Q-Expression",
            })
        }
    };
    if items.is_empty() {
        return Err(LispError::EmptyHead);
    }
    items.truncate(1);
    Ok(Value::Qexpr(items))
}

/// The Q-expression with its first element removed.
pub fn builtin_tail(_env: &EnvRef, mut args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 1 {
        return Err(LispError::WrongArgCount {
            func: "tail",
            got: args.len(),
            expected: 1,
        });
    }
    let mut items = expect_qexpr("tail", args.remove(0))?;
    if items.is_empty() {
        return Err(LispError::EmptyTail);
    }
    items.remove(0);
    Ok(Value::Qexpr(items))
}

/// Concatenate any number of Q-expressions in order.
pub fn builtin_join(_env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    let mut joined = Vec::new();
    for arg in args {
        joined.append(&mut expect_qexpr("join", arg)?);
    }
    Ok(Value::Qexpr(joined))
}

/// Retag a Q-expression as an S-expression and evaluate it in the current
/// environment.
pub fn builtin_eval(env: &EnvRef, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_len("eval", &args, 1)?;
    let items = expect_qexpr("eval", args.remove(0))?;
    Ok(eval::eval(env, Value::Sexpr(items)))
}

/// Register all list builtins in the environment.
pub fn register(env: &EnvRef) {
    let mut env = env.borrow_mut();
    env.put("list", Value::Builtin(builtin_list));
    env.put("head", Value::Builtin(builtin_head));
    env.put("tail", Value::Builtin(builtin_tail));
    env.put("join", Value::Builtin(builtin_join));
    env.put("eval", Value::Builtin(builtin_eval));
}
