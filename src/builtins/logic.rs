//! Logic and branching builtins: `&&`, `||`, `!`, `if`.
//!
//! These are the only builtins that evaluate arguments themselves: `if`
//! receives its branches as inert Q-expressions and evaluates only the one
//! it selects, while `&&`/`||`/`!` re-evaluate operands one at a time and
//! stop at the deciding one. Truthiness is Numbers only: zero is false,
//! anything else is true.

use crate::builtins::{expect_len, expect_num, expect_qexpr};
use crate::env::EnvRef;
use crate::error::LispError;
use crate::eval::eval;
use crate::value::Value;

fn bool_op(
    env: &EnvRef,
    op: &'static str,
    args: Vec<Value>,
    stop_on_false: bool,
) -> Result<Value, LispError> {
    if args.len() < 2 {
        return Err(LispError::BooleanArity(op));
    }
    let mut result = stop_on_false;
    for arg in args {
        let value = eval(env, arg);
        let n = match value {
            Value::Num(n) => n,
            other => {
                return Err(LispError::WrongType {
                    func: op,
                    got: other.type_name(),
                    expected: "Number",
                })
            }
        };
        if stop_on_false && n == 0 {
            result = false;
            break;
        }
        if !stop_on_false && n != 0 {
            result = true;
            break;
        }
    }
    Ok(Value::Num(result as i64))
}

pub fn builtin_and(env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    bool_op(env, "&&", args, true)
}

pub fn builtin_or(env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    bool_op(env, "||", args, false)
}

pub fn builtin_not(env: &EnvRef, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_len("!", &args, 1)?;
    match eval(env, args.remove(0)) {
        Value::Num(n) => Ok(Value::Num((n == 0) as i64)),
        other => Err(LispError::WrongType {
            func: "!",
            got: other.type_name(),
            expected: "Number",
        }),
    }
}

/// Branch on a Number condition; both branches must be Q-expressions and
/// only the chosen one is retagged and evaluated.
pub fn builtin_if(env: &EnvRef, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_len("if", &args, 3)?;
    let cond = expect_num("if", &args[0])?;
    for arg in &args[1..] {
        if !matches!(arg, Value::Qexpr(_)) {
            return Err(LispError::WrongType {
                func: "if",
                got: arg.type_name(),
                expected: "Q-Expression",
            });
        }
    }
    let branch = args.swap_remove(if cond != 0 { 1 } else { 2 });
    let body = expect_qexpr("if", branch)?;
    Ok(eval(env, Value::Sexpr(body)))
}

/// Register all logic builtins in the environment.
pub fn register(env: &EnvRef) {
    let mut env = env.borrow_mut();
    env.put("&&", Value::Builtin(builtin_and));
    env.put("||", Value::Builtin(builtin_or));
    env.put("!", Value::Builtin(builtin_not));
    env.put("if", Value::Builtin(builtin_if));
}
