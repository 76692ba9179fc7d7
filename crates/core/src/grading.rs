//! Lexical checks applied to a submitted query.
//!
//! Neither function parses SQL. The guard gates execution on the leading
//! verb; the oracle compares normalized text against the expected answer.

//
// ─── GUARD ─────────────────────────────────────────────────────────────────────
//

/// The only verb a submission may start with.
pub const READ_VERB: &str = "select";

/// Returns true if the submission may be executed.
///
/// Surrounding whitespace is ignored and the check is case-insensitive.
/// Nothing after the verb is inspected.
///
/// ```
/// # use quiz_core::grading::is_allowed;
/// assert!(is_allowed("  SeLeCt 1"));
/// assert!(!is_allowed("DROP TABLE x"));
/// ```
#[must_use]
pub fn is_allowed(raw: &str) -> bool {
    raw.trim().to_lowercase().starts_with(READ_VERB)
}

//
// ─── ORACLE ────────────────────────────────────────────────────────────────────
//

/// Lower-case the text and drop every space and semicolon.
///
/// Only U+0020 is removed; tabs and newlines survive.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| *c != ' ' && *c != ';')
        .collect()
}

/// Returns true if the normalized submission starts with the normalized
/// expected query.
///
/// Trailing clauses after the expected text still pass, and literal contents
/// are case-folded along with everything else.
///
/// ```
/// # use quiz_core::grading::evaluate;
/// let expected = "SELECT * FROM ogrenciler WHERE yas > 21";
/// assert!(evaluate("select * from ogrenciler where yas>21 ORDER BY ad;", expected));
/// assert!(!evaluate("SELECT ad FROM ogrenciler", expected));
/// ```
#[must_use]
pub fn evaluate(submitted: &str, expected: &str) -> bool {
    normalize(submitted).starts_with(&normalize(expected))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::model::PromptCatalog;

    #[test]
    fn guard_accepts_select_in_any_case() {
        assert!(is_allowed("SELECT * FROM ogrenciler"));
        assert!(is_allowed("select 1"));
        assert!(is_allowed(" SeLeCt 1"));
        assert!(is_allowed("\n\tselect 1\n"));
    }

    #[test]
    fn guard_rejects_other_verbs() {
        assert!(!is_allowed("DROP TABLE x"));
        assert!(!is_allowed("UPDATE ogrenciler SET yas=0"));
        assert!(!is_allowed("delete from ogrenciler"));
        assert!(!is_allowed(""));
        assert!(!is_allowed("   "));
        assert!(!is_allowed("-- comment\nSELECT 1"));
    }

    #[test]
    fn guard_only_checks_the_prefix() {
        // Whatever follows the verb is the engine's business.
        assert!(is_allowed("SELECT 1; DROP TABLE ogrenciler"));
        assert!(is_allowed("selectify"));
    }

    #[test]
    fn normalize_strips_spaces_and_semicolons_anywhere() {
        assert_eq!(normalize("SELECT * FROM t;"), "select*fromt");
        assert_eq!(normalize("a ; b ;; c"), "abc");
        assert_eq!(normalize("WHERE soyad = 'Demir'"), "wheresoyad='demir'");
    }

    #[test]
    fn normalize_keeps_tabs_and_newlines() {
        assert_eq!(normalize("SELECT\t*\nFROM t"), "select\t*\nfromt");
    }

    #[test]
    fn evaluate_accepts_exact_and_reformatted_text() {
        let expected = "SELECT * FROM ogrenciler";
        assert!(evaluate("SELECT * FROM ogrenciler", expected));
        assert!(evaluate("select  *  from  ogrenciler ;", expected));
        assert!(evaluate("SELECT*FROM ogrenciler", expected));
    }

    #[test]
    fn evaluate_accepts_trailing_clauses() {
        let expected = "SELECT * FROM ogrenciler WHERE yas > 21";
        assert!(evaluate(
            "SELECT * FROM ogrenciler WHERE yas > 21 ORDER BY ad",
            expected
        ));
    }

    #[test]
    fn evaluate_folds_literal_case() {
        let expected = "SELECT * FROM ogrenciler WHERE soyad = 'Demir'";
        assert!(evaluate(
            "SELECT * FROM ogrenciler WHERE soyad = 'demir'",
            expected
        ));
    }

    #[test]
    fn evaluate_rejects_different_queries() {
        let expected = "SELECT * FROM ogrenciler WHERE yas > 21";
        assert!(!evaluate("SELECT * FROM ogrenciler", expected));
        assert!(!evaluate("SELECT * FROM ogrenciler WHERE yas >= 21", expected));
        assert!(!evaluate("SELECT *\nFROM ogrenciler WHERE yas > 21", expected));
    }

    fn scramble(rng: &mut StdRng, text: &str) -> String {
        let mut out = String::with_capacity(text.len() * 2);
        for c in text.chars() {
            if rng.random_bool(0.3) {
                out.push(' ');
            }
            if rng.random_bool(0.5) {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
        }
        if rng.random_bool(0.5) {
            out.push(';');
        }
        out
    }

    #[test]
    fn evaluate_survives_random_casing_and_spacing() {
        let catalog = PromptCatalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for prompt in catalog.iter() {
            for _ in 0..200 {
                let submitted = scramble(&mut rng, prompt.expected_query());
                assert!(
                    evaluate(&submitted, prompt.expected_query()),
                    "{submitted:?} should match {:?}",
                    prompt.expected_query()
                );
                assert_eq!(
                    evaluate(&submitted, prompt.expected_query()),
                    normalize(&submitted).starts_with(&normalize(prompt.expected_query()))
                );
            }
        }
    }
}
