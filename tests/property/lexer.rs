use proptest::prelude::*;

use postgen::exec::lexer::split;

/// Quote a word so that a POSIX shell reads it back unchanged.
fn shell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}

proptest! {
    #[test]
    fn quoted_words_split_back_to_themselves(
        words in proptest::collection::vec("[a-zA-Z0-9 '\"\\\\$#*._=-]{0,12}", 1..6)
    ) {
        let line = words.iter().map(|w| shell_quote(w)).collect::<Vec<_>>().join(" ");
        prop_assert_eq!(split(&line).unwrap(), words);
    }

    #[test]
    fn unquoted_words_split_on_blanks(
        words in proptest::collection::vec("[a-zA-Z0-9._/=-]{1,10}", 0..8),
        seps in proptest::collection::vec("[ \t\r\n]{1,3}", 8)
    ) {
        let mut line = String::new();
        for (word, sep) in words.iter().zip(seps.iter()) {
            line.push_str(word);
            line.push_str(sep);
        }
        prop_assert_eq!(split(&line).unwrap(), words);
    }

    #[test]
    fn lexing_never_panics(input in "\\PC{0,40}") {
        let _ = split(&input);
    }
}
