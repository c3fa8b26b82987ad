// ABOUTME: CLI driver: REPL loop and file runner

use clap::Parser;
use qlisp::builtins::{io, register_builtins};
use qlisp::config;
use qlisp::env::{Env, EnvRef};
use qlisp::eval::eval;
use qlisp::parser::parse;
use qlisp::prelude;
use qlisp::value::Value;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

/// A small homoiconic Lisp with Q-expressions and currying
#[derive(Parser, Debug)]
#[command(name = "qlisp")]
#[command(version = config::VERSION)]
#[command(about = "A small homoiconic Lisp with Q-expressions and currying")]
struct CliArgs {
    /// Source files to load and evaluate (starts the REPL when omitted)
    #[arg(value_name = "FILE")]
    files: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let env = Env::new();
    register_builtins(&env);
    if let Err(e) = prelude::install(&env) {
        eprintln!("Error: Could not initialize prelude: {}", e);
        std::process::exit(1);
    }

    if !args.files.is_empty() {
        for file in args.files {
            run_file(&env, file);
        }
        return Ok(());
    }

    run_repl(&env)
}

/// Evaluate one file through the `load` builtin, printing any Error result.
fn run_file(env: &EnvRef, file: String) {
    if let Err(e) = io::builtin_load(env, vec![Value::Str(file)]) {
        println!("{}", Value::from(e));
    }
}

fn run_repl(env: &EnvRef) -> Result<(), Box<dyn std::error::Error>> {
    let repl_config = Config::builder().auto_add_history(true).build();
    let mut rl = DefaultEditor::with_config(repl_config)
        .map_err(|e| format!("Failed to initialize REPL: {}", e))?;
    let _ = rl.load_history(config::HISTORY_FILE);

    println!("{}", config::WELCOME_MESSAGE);
    println!("{}", config::WELCOME_FOOTER);

    loop {
        match rl.readline(config::PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                // A whole REPL line is one S-expression, so `+ 1 2` works
                // without outer parentheses.
                match parse(&line) {
                    Ok(exprs) => println!("{}", eval(env, Value::Sexpr(exprs))),
                    Err(e) => eprintln!("Parse error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(config::HISTORY_FILE);
    Ok(())
}
