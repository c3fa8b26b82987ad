// ABOUTME: Embedded prelude source evaluated into the root environment at start-up

use crate::env::EnvRef;
use crate::eval::eval;
use crate::parser;
use crate::value::Value;

/// The prelude, written in qlisp itself and compiled into the binary.
pub const PRELUDE: &str = include_str!("prelude.lisp");

/// Evaluate the prelude in `env`. Expressions that produce an Error are
/// printed and skipped; a prelude that fails to parse is fatal to start-up.
pub fn install(env: &EnvRef) -> Result<(), String> {
    let exprs = parser::parse(PRELUDE)?;
    for expr in exprs {
        let result = eval(env, expr);
        if matches!(result, Value::Err(_)) {
            eprintln!("{}", result);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::env::Env;

    #[test]
    fn test_prelude_installs_cleanly() {
        let env = Env::new();
        register_builtins(&env);
        install(&env).expect("prelude should parse");
        for name in ["nil", "map", "foldl", "curry", "otherwise"] {
            assert!(env.borrow().get(name).is_some(), "missing {}", name);
        }
    }
}
