//! Definition builtins: `def` (global), `=` (local), `\` (lambda
//! construction), and `fun` (sugar for a global named lambda).

use crate::builtins::{expect_len, expect_qexpr};
use crate::env::{Env, EnvRef};
use crate::error::LispError;
use crate::value::{Lambda, Value};

/// Shared body of `def` and `=`: a Q-expression of symbols followed by one
/// value per symbol.
fn bind_symbols(env: &EnvRef, func: &'static str, mut args: Vec<Value>) -> Result<Value, LispError> {
    if args.is_empty() {
        return Err(LispError::WrongArgCount {
            func,
            got: 0,
            expected: 1,
        });
    }
    let syms = expect_qexpr(func, args.remove(0))?;

    let mut names = Vec::with_capacity(syms.len());
    for sym in &syms {
        match sym {
            Value::Sym(name) => names.push(name.clone()),
            other => {
                return Err(LispError::DefineNonSymbol {
                    func,
                    got: other.type_name(),
                })
            }
        }
    }
    if names.len() != args.len() {
        return Err(LispError::SymbolCountMismatch {
            func,
            got: names.len(),
            expected: args.len(),
        });
    }

    for (name, value) in names.into_iter().zip(args) {
        if func == "def" {
            Env::def(env, name, value);
        } else {
            env.borrow_mut().put(name, value);
        }
    }
    Ok(Value::unit())
}

pub fn builtin_def(env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    bind_symbols(env, "def", args)
}

pub fn builtin_put(env: &EnvRef, args: Vec<Value>) -> Result<Value, LispError> {
    bind_symbols(env, "=", args)
}

/// Validate a formals Q-expression into plain symbol names.
fn formal_names(items: Vec<Value>) -> Result<Vec<String>, LispError> {
    let mut names = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Sym(name) => names.push(name),
            other => {
                return Err(LispError::NonSymbolFormal {
                    got: other.type_name(),
                })
            }
        }
    }
    Ok(names)
}

/// `\` constructs a lambda with a fresh captured environment.
pub fn builtin_lambda(_env: &EnvRef, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_len("\\", &args, 2)?;
    let formals = expect_qexpr("\\", args.remove(0))?;
    let body = expect_qexpr("\\", args.remove(0))?;
    let formals = formal_names(formals)?;
    Ok(Value::Lambda(Box::new(Lambda {
        formals,
        body,
        env: Env::new(),
    })))
}

/// `fun {name args...} {body}` is sugar for `def {name} (\ {args...} {body})`.
pub fn builtin_fun(env: &EnvRef, mut args: Vec<Value>) -> Result<Value, LispError> {
    expect_len("fun", &args, 2)?;
    let signature = expect_qexpr("fun", args.remove(0))?;
    let body = expect_qexpr("fun", args.remove(0))?;
    if signature.is_empty() {
        return Err(LispError::MissingFunctionName);
    }
    let mut names = formal_names(signature)?;
    let name = names.remove(0);
    let lambda = Value::Lambda(Box::new(Lambda {
        formals: names,
        body,
        env: Env::new(),
    }));
    Env::def(env, name, lambda);
    Ok(Value::unit())
}

/// Register all definition builtins in the environment.
pub fn register(env: &EnvRef) {
    let mut env = env.borrow_mut();
    env.put("def", Value::Builtin(builtin_def));
    env.put("=", Value::Builtin(builtin_put));
    env.put("\\", Value::Builtin(builtin_lambda));
    env.put("fun", Value::Builtin(builtin_fun));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_def_requires_symbols() {
        let env = Env::new();
        let args = vec![Value::Qexpr(vec![Value::Num(1)]), Value::Num(2)];
        assert_eq!(
            builtin_def(&env, args),
            Err(LispError::DefineNonSymbol {
                func: "def",
                got: "Number",
            })
        );
    }

    #[test]
    fn test_def_requires_matching_counts() {
        let env = Env::new();
        let args = vec![
            Value::Qexpr(vec![Value::Sym("a".to_string()), Value::Sym("b".to_string())]),
            Value::Num(1),
        ];
        assert_eq!(
            builtin_def(&env, args),
            Err(LispError::SymbolCountMismatch {
                func: "def",
                got: 2,
                expected: 1,
            })
        );
    }

    #[test]
    fn test_fun_requires_a_name() {
        let env = Env::new();
        let args = vec![Value::Qexpr(vec![]), Value::Qexpr(vec![])];
        assert_eq!(builtin_fun(&env, args), Err(LispError::MissingFunctionName));
    }

    #[test]
    fn test_lambda_rejects_non_symbol_formals() {
        let env = Env::new();
        let args = vec![
            Value::Qexpr(vec![Value::Num(5)]),
            Value::Qexpr(vec![Value::Sym("x".to_string())]),
        ];
        assert_eq!(
            builtin_lambda(&env, args),
            Err(LispError::NonSymbolFormal { got: "Number" })
        );
    }
}
