// ABOUTME: Evaluator and call protocol: S-expression reduction, currying, variadic binding

use crate::env::{Env, EnvRef};
use crate::error::LispError;
use crate::value::{Lambda, Value};

/// Evaluate a value in an environment. Symbols resolve through the
/// environment chain, S-expressions reduce by the rules below, and every
/// other kind (including Errors) evaluates to itself.
pub fn eval(env: &EnvRef, value: Value) -> Value {
    match value {
        Value::Sym(name) => match env.borrow().get(&name) {
            Some(bound) => bound,
            None => Value::Err(LispError::UnboundSymbol(name)),
        },
        Value::Sexpr(cells) => eval_sexpr(env, cells),
        other => other,
    }
}

/// Reduce an S-expression: evaluate every child left to right, surface the
/// first Error child, auto-unwrap the empty and single-child forms, then
/// dispatch the head as a function over the remaining children.
fn eval_sexpr(env: &EnvRef, cells: Vec<Value>) -> Value {
    let mut evaled: Vec<Value> = cells.into_iter().map(|cell| eval(env, cell)).collect();

    if let Some(pos) = evaled.iter().position(|v| matches!(v, Value::Err(_))) {
        return evaled.swap_remove(pos);
    }
    if evaled.is_empty() {
        return Value::Sexpr(evaled);
    }
    if evaled.len() == 1 {
        return evaled.remove(0);
    }

    let f = evaled.remove(0);
    match f {
        Value::Builtin(_) | Value::Lambda(_) => apply(env, f, evaled),
        other => Value::Err(LispError::InvalidHead {
            got: other.type_name(),
        }),
    }
}

/// Apply a function to an argument list. Builtins consume the list
/// directly. Lambdas run the binding loop: formals are bound one by one
/// into the captured environment, a `&` formal captures all remaining
/// arguments as a Q-expression, and an under-applied lambda is returned
/// with its remaining formals (currying). Once every formal is bound the
/// captured environment is reparented to the caller and the body runs as an
/// S-expression inside it.
pub fn apply(env: &EnvRef, f: Value, mut args: Vec<Value>) -> Value {
    let mut lambda = match f {
        Value::Builtin(builtin) => return builtin(env, args).unwrap_or_else(Value::from),
        Value::Lambda(lambda) => lambda,
        other => {
            return Value::Err(LispError::InvalidHead {
                got: other.type_name(),
            })
        }
    };

    let total = lambda.formals.len();
    let given = args.len();

    while !args.is_empty() {
        if lambda.formals.is_empty() {
            return Value::Err(LispError::TooManyCallArgs {
                got: given,
                expected: total,
            });
        }
        let formal = lambda.formals.remove(0);
        if formal == "&" {
            if lambda.formals.len() != 1 {
                return Value::Err(LispError::MalformedVariadic);
            }
            let rest = lambda.formals.remove(0);
            let captured = Value::Qexpr(std::mem::take(&mut args));
            lambda.env.borrow_mut().put(rest, captured);
            break;
        }
        let value = args.remove(0);
        lambda.env.borrow_mut().put(formal, value);
    }

    // A trailing `& rest` that received no arguments binds the empty list.
    if lambda.formals.first().map(String::as_str) == Some("&") {
        if lambda.formals.len() != 2 {
            return Value::Err(LispError::MalformedVariadic);
        }
        lambda.formals.remove(0);
        let rest = lambda.formals.remove(0);
        lambda.env.borrow_mut().put(rest, Value::Qexpr(Vec::new()));
    }

    if lambda.formals.is_empty() {
        let Lambda { body, env: captured, .. } = *lambda;
        Env::set_parent(&captured, env);
        eval(&captured, Value::Sexpr(body))
    } else {
        Value::Lambda(lambda)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::parser::parse;

    fn setup() -> EnvRef {
        let env = Env::new();
        register_builtins(&env);
        env
    }

    /// Evaluate one REPL-style line and return its printed form.
    fn run(env: &EnvRef, line: &str) -> String {
        let exprs = parse(line).expect("parse should succeed");
        eval(env, Value::Sexpr(exprs)).to_string()
    }

    #[test]
    fn test_numbers_evaluate_to_themselves() {
        let env = setup();
        assert_eq!(run(&env, "5"), "5");
        assert_eq!(run(&env, "\"hi\""), "\"hi\"");
    }

    #[test]
    fn test_qexprs_are_inert() {
        let env = setup();
        assert_eq!(run(&env, "{+ 1 2}"), "{+ 1 2}");
    }

    #[test]
    fn test_empty_sexpr_evaluates_to_itself() {
        let env = setup();
        assert_eq!(run(&env, "()"), "()");
    }

    #[test]
    fn test_single_child_unwraps() {
        let env = setup();
        assert_eq!(run(&env, "(5)"), "5");
        assert_eq!(run(&env, "((5))"), "5");
    }

    #[test]
    fn test_unbound_symbol() {
        let env = setup();
        assert_eq!(run(&env, "missing"), "Error: Unbound Symbol 'missing'");
    }

    #[test]
    fn test_head_must_be_a_function() {
        let env = setup();
        assert_eq!(
            run(&env, "1 2 3"),
            "Error: S-Expression starts with incorrect type. Got Number, Expected Function."
        );
    }

    #[test]
    fn test_first_error_wins() {
        let env = setup();
        assert_eq!(run(&env, "+ first second"), "Error: Unbound Symbol 'first'");
    }

    #[test]
    fn test_lambda_application() {
        let env = setup();
        assert_eq!(run(&env, "(\\ {x y} {+ x y}) 10 20"), "30");
    }

    #[test]
    fn test_currying() {
        let env = setup();
        run(&env, "def {add-mul} (\\ {x y} {+ x (* x y)})");
        assert_eq!(run(&env, "add-mul 10 20"), "210");
        assert_eq!(run(&env, "(add-mul 10) 20"), "210");
        // partial application must not disturb the original definition
        assert_eq!(run(&env, "add-mul 2 3"), "8");
    }

    #[test]
    fn test_partial_application_prints_remaining_formals() {
        let env = setup();
        assert_eq!(run(&env, "(\\ {x y} {+ x y}) 1"), "(\\ {y} {+ x y})");
    }

    #[test]
    fn test_over_application() {
        let env = setup();
        assert_eq!(
            run(&env, "(\\ {x} {x}) 1 2"),
            "Error: Function passed too many arguments. Got 2, Expected 1."
        );
    }

    #[test]
    fn test_variadic_binding() {
        let env = setup();
        run(&env, "def {v} (\\ {x & xs} {list x xs})");
        assert_eq!(run(&env, "v 1 2 3"), "{1 {2 3}}");
        assert_eq!(run(&env, "v 1"), "{1 {}}");
    }

    #[test]
    fn test_malformed_variadic() {
        let env = setup();
        assert_eq!(
            run(&env, "(\\ {&} {1}) 5"),
            "Error: Function format invalid. Symbol '&' not followed by single symbol."
        );
    }

    #[test]
    fn test_def_is_global_put_is_local() {
        let env = setup();
        run(&env, "def {set-local} (\\ {x} {= {loc} x})");
        run(&env, "def {set-global} (\\ {x} {def {glob} x})");
        run(&env, "set-local 5");
        run(&env, "set-global 7");
        assert_eq!(run(&env, "loc"), "Error: Unbound Symbol 'loc'");
        assert_eq!(run(&env, "glob"), "7");
    }

    #[test]
    fn test_recursion_through_global_bindings() {
        let env = setup();
        run(
            &env,
            "def {count-down} (\\ {n} {if (<= n 0) {0} {count-down (- n 1)}})",
        );
        assert_eq!(run(&env, "count-down 10"), "0");
    }
}
