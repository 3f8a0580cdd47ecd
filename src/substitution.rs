//! Interface to the text-side substitution-rules subsystem.
//!
//! The rules themselves (PCRE2-dialect `<LHS>\t<RHS>` pairs applied in file
//! order to a bounded subject string, skipping quoted/bracketed sections)
//! are a preprocessing collaborator external to the evaluator core. Only
//! the seam the evaluator needs is modeled here.

/// Applies substitution rules to a query subject string before tokenization.
/// The evaluator core depends only on this trait, never on a concrete rule
/// engine.
pub trait SubstitutionRules {
    /// Rewrites `subject` in place, applying rules in order. Sections
    /// delimited by `"` or `[` are left untouched when `skip_operators` is
    /// set, mirroring the original's operator-aware substitution mode.
    fn apply(&self, subject: &str, skip_operators: bool) -> String;
}

/// No rules configured — returns the subject unchanged. The default when no
/// rules file is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSubstitutions;

impl SubstitutionRules for NoopSubstitutions {
    fn apply(&self, subject: &str, _skip_operators: bool) -> String {
        subject.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_returns_subject_unchanged() {
        let rules = NoopSubstitutions;
        assert_eq!(rules.apply("hello world", true), "hello world");
    }
}
