//! Whitespace tokenizer for command lines.

pub const MAX_ARGS: usize = 16;

/// Splits `line` on runs of spaces and tabs into at most [`MAX_ARGS`]
/// tokens, borrowing from the input. Returns the token count; anything
/// past the limit is dropped.
pub fn split_args<'a>(line: &'a str, argv: &mut [&'a str; MAX_ARGS]) -> usize {
    let mut argc = 0;
    for token in line.split([' ', '\t']) {
        if token.is_empty() {
            continue;
        }
        if argc == MAX_ARGS {
            break;
        }
        argv[argc] = token;
        argc += 1;
    }
    argc
}
