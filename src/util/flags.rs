//! Flag string handling.

/// Split the raw output of a discovery query into individual flags.
///
/// Trailing whitespace (including the final newline) is dropped and the
/// remainder is split on runs of whitespace. Empty or whitespace-only
/// output produces an empty list, never a list holding one empty string.
pub fn split_flags(output: &str) -> Vec<String> {
    output
        .trim_end()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_empty_output() {
        assert!(split_flags("").is_empty());
        assert!(split_flags("   \n\t ").is_empty());
        assert!(split_flags("\n").is_empty());
    }

    #[test]
    fn test_split_preserves_order() {
        assert_eq!(split_flags("-a -b -c"), vec!["-a", "-b", "-c"]);
    }

    #[test]
    fn test_split_strips_trailing_newline() {
        assert_eq!(
            split_flags("-I/usr/include/libmongoc-1.0 -I/usr/include/libbson-1.0\n"),
            vec!["-I/usr/include/libmongoc-1.0", "-I/usr/include/libbson-1.0"]
        );
    }

    #[test]
    fn test_split_collapses_whitespace_runs() {
        assert_eq!(split_flags("  -lmongoc-1.0\t\t-lbson-1.0  "), vec!["-lmongoc-1.0", "-lbson-1.0"]);
    }

    #[test]
    fn test_split_keeps_duplicates() {
        assert_eq!(split_flags("-lm -lm"), vec!["-lm", "-lm"]);
    }
}
