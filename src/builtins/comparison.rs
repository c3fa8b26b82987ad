//! Comparison builtins: ordering on Numbers, structural equality on any
//! pair of values. All return 1 for true and 0 for false.

use crate::builtins::{expect_len, expect_num};
use crate::env::EnvRef;
use crate::error::LispError;
use crate::value::Value;

fn ord_op(op: &'static str, args: Vec<Value>) -> Result<Value, LispError> {
    expect_len(op, &args, 2)?;
    let a = expect_num(op, &args[0])?;
    let b = expect_num(op, &args[1])?;
    let truth = match op {
        "<" => a < b,
        "<=" => a <= b,
        ">" => a > b,
        _ => a >= b,
    };
    Ok(Value::Num(truth as i64))
}

fn cmp_op(op: &'static str, args: Vec<Value>) -> Result<Value, LispError> {
    expect_len(op, &args, 2)?;
    let equal = args[0] == args[1];
    let truth = if op == "==" { equal } else { !equal };
    Ok(Value::Num(truth as i64))
}

pub fn builtin_lt(_env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    ord_op("<", args)
}

pub fn builtin_lte(_env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    ord_op("<=", args)
}

pub fn builtin_gt(_env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    ord_op(">", args)
}

pub fn builtin_gte(_env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    ord_op(">=", args)
}

pub fn builtin_eq(_env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    cmp_op("==", args)
}

pub fn builtin_ne(_env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    cmp_op("!=", args)
}

/// Register all comparison builtins in the environment.
pub fn register(env: &EnvRef) {
    let mut env = env.borrow_mut();
    env.put("<", Value::Builtin(builtin_lt));
    env.put("<=", Value::Builtin(builtin_lte));
    env.put(">", Value::Builtin(builtin_gt));
    env.put(">=", Value::Builtin(builtin_gte));
    env.put("==", Value::Builtin(builtin_eq));
    env.put("!=", Value::Builtin(builtin_ne));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert_eq!(
            ord_op("<", vec![Value::Num(1), Value::Num(2)]),
            Ok(Value::Num(1))
        );
        assert_eq!(
            ord_op(">=", vec![Value::Num(1), Value::Num(2)]),
            Ok(Value::Num(0))
        );
    }

    #[test]
    fn test_ordering_requires_numbers() {
        assert_eq!(
            ord_op("<", vec![Value::Num(1), Value::Str("x".to_string())]),
            Err(LispError::WrongType {
                func: "<",
                got: "String",
                expected: "Number",
            })
        );
    }

    #[test]
    fn test_structural_equality() {
        let a = Value::Qexpr(vec![Value::Num(1), Value::Sym("x".to_string())]);
        let b = Value::Qexpr(vec![Value::Num(1), Value::Sym("x".to_string())]);
        assert_eq!(cmp_op("==", vec![a, b]), Ok(Value::Num(1)));
        assert_eq!(
            cmp_op("!=", vec![Value::Num(1), Value::Str("1".to_string())]),
            Ok(Value::Num(1))
        );
    }
}
