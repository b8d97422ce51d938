// src/exec/lexer.rs

//! POSIX-style shell word splitting.
//!
//! Only word splitting and quote removal are performed: no variable
//! expansion, globbing, pipes or comments. The rules:
//!
//! - unquoted space, tab, CR and LF separate words (other Unicode
//!   whitespace is an ordinary character);
//! - `'...'` is taken literally;
//! - `"..."` is taken literally except that `\"` and `\\` are unescaped;
//! - an unquoted `\` takes the next character literally;
//! - quoted and unquoted segments glue together (`a"b c"d` is `ab cd`);
//! - `''` and `""` produce an empty word.

use crate::errors::ExecError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between words.
    Blank,
    /// Inside an unquoted part of a word.
    Word,
    Single,
    Double,
}

/// Split `input` into words the way a POSIX shell would.
pub fn split(input: &str) -> Result<Vec<String>, ExecError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut state = State::Blank;
    let mut chars = input.chars();

    let lex_error = |reason: &str| ExecError::Lex {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    while let Some(c) = chars.next() {
        match state {
            State::Blank | State::Word => match c {
                ' ' | '\t' | '\n' | '\r' => {
                    if state == State::Word {
                        words.push(std::mem::take(&mut current));
                        state = State::Blank;
                    }
                }
                '\'' => state = State::Single,
                '"' => state = State::Double,
                '\\' => {
                    let escaped = chars.next().ok_or_else(|| lex_error("no escaped character"))?;
                    current.push(escaped);
                    state = State::Word;
                }
                c => {
                    current.push(c);
                    state = State::Word;
                }
            },
            State::Single => match c {
                '\'' => state = State::Word,
                c => current.push(c),
            },
            State::Double => match c {
                '"' => state = State::Word,
                '\\' => {
                    let next = chars.next().ok_or_else(|| lex_error("no closing quotation"))?;
                    if next != '"' && next != '\\' {
                        current.push('\\');
                    }
                    current.push(next);
                }
                c => current.push(c),
            },
        }
    }

    match state {
        State::Single | State::Double => Err(lex_error("no closing quotation")),
        State::Word => {
            words.push(current);
            Ok(words)
        }
        State::Blank => Ok(words),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(input: &str) -> Vec<String> {
        split(input).unwrap()
    }

    #[test]
    fn single_quotes_group_words() {
        assert_eq!(words("echo 'a b'"), vec!["echo", "a b"]);
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(words("  git   config\tuser.name  jane \n"), vec!["git", "config", "user.name", "jane"]);
        assert!(words("   ").is_empty());
        assert!(words("").is_empty());
    }

    #[test]
    fn only_ascii_blanks_separate_words() {
        assert_eq!(words("echo a\u{a0}b"), vec!["echo", "a\u{a0}b"]);
        assert_eq!(words("a\u{2003}b\rc"), vec!["a\u{2003}b", "c"]);
    }

    #[test]
    fn double_quotes_unescape_only_quote_and_backslash() {
        assert_eq!(words(r#"echo "say \"hi\"""#), vec!["echo", r#"say "hi""#]);
        assert_eq!(words(r#"echo "a\\b""#), vec!["echo", r"a\b"]);
        assert_eq!(words(r#"echo "a\nb""#), vec!["echo", r"a\nb"]);
    }

    #[test]
    fn backslash_escapes_outside_quotes() {
        assert_eq!(words(r"touch my\ file"), vec!["touch", "my file"]);
        assert_eq!(words(r"echo \'"), vec!["echo", "'"]);
    }

    #[test]
    fn adjacent_segments_are_glued() {
        assert_eq!(words(r#"a"b c"d'e f'"#), vec!["ab cde f"]);
    }

    #[test]
    fn empty_quotes_yield_empty_word() {
        assert_eq!(words("git commit -m ''"), vec!["git", "commit", "-m", ""]);
        assert_eq!(words(r#""""#), vec![""]);
    }

    #[test]
    fn hash_is_an_ordinary_character() {
        assert_eq!(words("echo #not-a-comment"), vec!["echo", "#not-a-comment"]);
    }

    #[test]
    fn unterminated_quotes_are_rejected() {
        assert!(matches!(split("echo 'oops"), Err(ExecError::Lex { .. })));
        assert!(matches!(split("echo \"oops"), Err(ExecError::Lex { .. })));
        assert!(matches!(split("echo oops\\"), Err(ExecError::Lex { .. })));
    }
}
