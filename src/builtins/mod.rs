//! # Built-in Functions
//!
//! The primitive operations registered into the root environment, organized
//! by family:
//!
//! - **[arithmetic]**: `+ - * /`
//! - **[comparison]**: `< <= > >= == !=`
//! - **[logic]**: `&& || ! if`
//! - **[lists]**: `list head tail join eval`
//! - **[vars]**: `def = \ fun`
//! - **[io]**: `load print error`
//!
//! Every builtin takes ownership of its argument list (the evaluated tail
//! of the calling S-expression) and validates before doing any work. A
//! returned `Err` is folded back into an Error value at the dispatch point
//! in the apply protocol.

use crate::env::EnvRef;
use crate::error::LispError;
use crate::value::Value;

pub mod arithmetic;
pub mod comparison;
pub mod io;
pub mod lists;
pub mod logic;
pub mod vars;

/// Register every builtin into the environment.
pub fn register_builtins(env: &EnvRef) {
    lists::register(env);
    arithmetic::register(env);
    vars::register(env);
    comparison::register(env);
    logic::register(env);
    io::register(env);
}

/// Check an exact argument count.
pub(crate) fn expect_len(
    func: &'static str,
    args: &[Value],
    expected: usize,
) -> Result<(), LispError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(LispError::TooManyArgs {
            func,
            got: args.len(),
            expected,
        })
    }
}

/// Check that an argument is a Q-expression and unwrap its elements.
pub(crate) fn expect_qexpr(func: &'static str, arg: Value) -> Result<Vec<Value>, LispError> {
    match arg {
        Value::Qexpr(items) => Ok(items),
        other => Err(LispError::WrongType {
            func,
            got: other.type_name(),
            expected: "Q-Expression",
        }),
    }
}

/// Check that an argument is a Number.
pub(crate) fn expect_num(func: &'static str, arg: &Value) -> Result<i64, LispError> {
    match arg {
        Value::Num(n) => Ok(*n),
        other => Err(LispError::WrongType {
            func,
            got: other.type_name(),
            expected: "Number",
        }),
    }
}
