//! Arithmetic builtins: `+`, `-`, `*`, `/`.
//!
//! Each takes one or more Numbers and folds left to right. `-` with a
//! single argument negates it; division by zero is an Error. Wrapping
//! arithmetic keeps overflow deterministic.

use crate::env::EnvRef;
use crate::error::LispError;
use crate::value::Value;

fn fold_op(op: &'static str, args: Vec<Value>) -> Result<Value, LispError> {
    let mut nums = Vec::with_capacity(args.len());
    for (pos, arg) in args.iter().enumerate() {
        match arg {
            Value::Num(n) => nums.push(*n),
            other => {
                return Err(LispError::WrongTypeAt {
                    func: op,
                    pos,
                    got: other.type_name(),
                    expected: "Number",
                })
            }
        }
    }

    let mut rest = nums.into_iter();
    let Some(mut acc) = rest.next() else {
        return Err(LispError::WrongArgCount {
            func: op,
            got: 0,
            expected: 1,
        });
    };

    let mut rest = rest.peekable();
    if op == "-" && rest.peek().is_none() {
        return Ok(Value::Num(acc.wrapping_neg()));
    }

    for n in rest {
        match op {
            "+" => acc = acc.wrapping_add(n),
            "-" => acc = acc.wrapping_sub(n),
            "*" => acc = acc.wrapping_mul(n),
            _ => {
                if n == 0 {
                    return Err(LispError::DivisionByZero);
                }
                acc = acc.wrapping_div(n);
            }
        }
    }
    Ok(Value::Num(acc))
}

pub fn builtin_add(_env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    fold_op("+", args)
}

pub fn builtin_sub(_env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    fold_op("-", args)
}

pub fn builtin_mul(_env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    fold_op("*", args)
}

pub fn builtin_div(_env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    fold_op("/", args)
}

/// Register all arithmetic builtins in the environment.
pub fn register(env: &EnvRef) {
    let mut env = env.borrow_mut();
    env.put("+", Value::Builtin(builtin_add));
    env.put("-", Value::Builtin(builtin_sub));
    env.put("*", Value::Builtin(builtin_mul));
    env.put("/", Value::Builtin(builtin_div));
}
