//! Locale-style name ordering.
//!
//! Names compare with the Unicode Collation Algorithm using the CLDR root
//! collation: punctuation and symbols before digits, digits before letters,
//! accents and case only breaking ties between equal base letters.
//! Byte order only breaks exact ties.

use std::cmp::Ordering;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};

thread_local! {
    static ROOT_COLLATOR: Option<CollatorBorrowed<'static>> =
        match Collator::try_new(Default::default(), CollatorOptions::default()) {
            Ok(collator) => Some(collator),
            Err(err) => {
                tracing::warn!(error = %err, "collation data unavailable, sorting by code point");
                None
            }
        };
}

/// Compare two entry names for display ordering.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => Ordering::Equal,
        })
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        names.sort_by(|a, b| compare_names(a, b));
        names
    }

    #[test]
    fn test_case_does_not_dominate() {
        assert_eq!(
            sorted(&["f.txt", "B.txt", "a.txt"]),
            vec!["a.txt", "B.txt", "f.txt"]
        );
    }

    #[test]
    fn test_accents_sort_with_base_letter() {
        assert_eq!(
            sorted(&["f.txt", "é.txt", "a.txt", "B.txt"]),
            vec!["a.txt", "B.txt", "é.txt", "f.txt"]
        );
    }

    #[test]
    fn test_unaccented_before_accented() {
        assert_eq!(compare_names("e", "é"), Ordering::Less);
        assert_eq!(compare_names("resume", "résumé"), Ordering::Less);
    }

    #[test]
    fn test_lowercase_before_uppercase() {
        assert_eq!(compare_names("a", "A"), Ordering::Less);
        assert_eq!(compare_names("Readme", "readme"), Ordering::Greater);
    }

    #[test]
    fn test_punctuation_and_digits_before_letters() {
        assert_eq!(
            sorted(&[
                "my-file.txt",
                "my_file.txt",
                "1.txt",
                "_notes.txt",
                "~backup.txt",
                "zeta.txt",
            ]),
            vec![
                "_notes.txt",
                "~backup.txt",
                "1.txt",
                "my_file.txt",
                "my-file.txt",
                "zeta.txt",
            ]
        );
    }

    #[test]
    fn test_equal_names() {
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_precomposed_and_decomposed_tie_break() {
        let precomposed = "\u{e9}";
        let decomposed = "e\u{301}";
        assert_ne!(compare_names(precomposed, decomposed), Ordering::Equal);
        assert_eq!(
            compare_names(precomposed, decomposed),
            compare_names(decomposed, precomposed).reverse()
        );
    }
}
