// ABOUTME: Error catalog for evaluation failures; Display output is the user-visible wording

use thiserror::Error;

/// Every failure the evaluator or a builtin can report. Errors travel as
/// ordinary values (`Value::Err`) and print as `Error: <message>`, so the
/// `Display` strings here are part of the observable language surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LispError {
    #[error("Unbound Symbol '{0}'")]
    UnboundSymbol(String),

    #[error("Function '{func}' passed too many arguments. Got {got}, Expected {expected}.")]
    TooManyArgs {
        func: &'static str,
        got: usize,
        expected: usize,
    },

    #[error("Function '{func}' passed incorrect number of arguments. Got {got}, Expected {expected}.")]
    WrongArgCount {
        func: &'static str,
        got: usize,
        expected: usize,
    },

    #[error("Function '{func}' passed incorrect type. Got {got}, Expected {expected}.")]
    WrongType {
        func: &'static str,
        got: &'static str,
        expected: &'static str,
    },

    #[error("Function '{func}' passed incorrect type for argument {pos}. Got {got}, Expected {expected}.")]
    WrongTypeAt {
        func: &'static str,
        pos: usize,
        got: &'static str,
        expected: &'static str,
    },

    #[error("Function '{func}' cannot define non-symbol. Got {got}, Expected Symbol.")]
    DefineNonSymbol {
        func: &'static str,
        got: &'static str,
    },

    #[error("Cannot define non-symbol. Got {got}, Expected Symbol.")]
    NonSymbolFormal { got: &'static str },

    #[error("Function '{func}' passed too many arguments for symbols. Got {got}, Expected {expected}.")]
    SymbolCountMismatch {
        func: &'static str,
        got: usize,
        expected: usize,
    },

    /// Over-application of a lambda; no function name is available.
    #[error("Function passed too many arguments. Got {got}, Expected {expected}.")]
    TooManyCallArgs { got: usize, expected: usize },

    #[error("Function format invalid. Symbol '&' not followed by single symbol.")]
    MalformedVariadic,

    #[error("Function name is required.")]
    MissingFunctionName,

    #[error("Function 'head' passed {{}}.")]
    EmptyHead,

    #[error("Function 'tail' passed {{}}!")]
    EmptyTail,

    #[error("Division By Zero!")]
    DivisionByZero,

    #[error("Boolean operation '{0}' takes at least 2 arguments.")]
    BooleanArity(&'static str),

    #[error("S-Expression starts with incorrect type. Got {got}, Expected Function.")]
    InvalidHead { got: &'static str },

    #[error("Invalid number. Got '{0}'.")]
    InvalidNumber(String),

    #[error("Could not load Library {0}")]
    LoadFailed(String),

    /// Raised from the language via the `error` builtin; the message is
    /// carried verbatim.
    #[error("{0}")]
    Raised(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wording_is_stable() {
        assert_eq!(
            LispError::UnboundSymbol("foo".to_string()).to_string(),
            "Unbound Symbol 'foo'"
        );
        assert_eq!(
            LispError::TooManyArgs {
                func: "head",
                got: 2,
                expected: 1
            }
            .to_string(),
            "Function 'head' passed too many arguments. Got 2, Expected 1."
        );
        assert_eq!(
            LispError::WrongTypeAt {
                func: "+",
                pos: 1,
                got: "String",
                expected: "Number"
            }
            .to_string(),
            "Function '+' passed incorrect type for argument 1. Got String, Expected Number."
        );
        assert_eq!(
            LispError::EmptyHead.to_string(),
            "Function 'head' passed {}."
        );
        assert_eq!(
            LispError::EmptyTail.to_string(),
            "Function 'tail' passed {}!"
        );
        assert_eq!(LispError::DivisionByZero.to_string(), "Division By Zero!");
    }

    #[test]
    fn test_raised_errors_carry_message_verbatim() {
        assert_eq!(
            LispError::Raised("something went wrong".to_string()).to_string(),
            "something went wrong"
        );
    }
}
