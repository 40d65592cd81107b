//! Rule chain builder for fluent field validation.

use regex::Regex;

use super::result::ValidationResult;

/// Type alias for rule predicates.
type Rule<V> = Box<dyn Fn(&V) -> bool + Send + Sync>;

/// Ordered list of rules for a single field.
///
/// Rules run in insertion order and the first failing rule's message is the
/// result; later rules are not evaluated.
///
/// # Example
///
/// ```
/// use onboard_forms::validation::RuleChain;
///
/// let result = RuleChain::text()
///     .required("Username is required")
///     .min_length(3, "Username must be at least 3 characters")
///     .check("ab");
///
/// assert_eq!(result.message(), Some("Username must be at least 3 characters"));
/// ```
pub struct RuleChain<V: ?Sized> {
    rules: Vec<(Rule<V>, String)>,
}

impl<V: ?Sized> RuleChain<V> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule; `f` returns `true` when the value passes.
    pub fn rule<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.rules.push((Box::new(f), msg.into()));
        self
    }

    /// Run the chain against a value.
    pub fn check(&self, value: &V) -> ValidationResult {
        self.rules
            .iter()
            .find(|(rule, _)| !rule(value))
            .map_or(ValidationResult::Valid, |(_, msg)| {
                ValidationResult::Invalid(msg.clone())
            })
    }

    /// Number of rules in the chain.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<V: ?Sized> Default for RuleChain<V> {
    fn default() -> Self {
        Self::new()
    }
}

// Built-in rules for text values
impl RuleChain<str> {
    /// Create an empty chain over text.
    pub fn text() -> Self {
        Self::new()
    }

    /// Require the value to be non-blank after trimming.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(|v| !v.trim().is_empty(), msg)
    }

    /// Require the value to be non-empty. Whitespace counts as content.
    pub fn present(self, msg: impl Into<String>) -> Self {
        self.rule(|v| !v.is_empty(), msg)
    }

    /// Require minimum length, untrimmed.
    ///
    /// Length is measured in UTF-16 code units, so a character outside the
    /// Basic Multilingual Plane (most emoji) counts as two.
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.encode_utf16().count() >= min, msg)
    }

    /// Require the value to match a precompiled regex.
    pub fn pattern(self, re: &'static Regex, msg: impl Into<String>) -> Self {
        self.rule(move |v| re.is_match(v), msg)
    }

    /// Require at least one character satisfying `pred`.
    pub fn contains_char<P>(self, pred: P, msg: impl Into<String>) -> Self
    where
        P: Fn(char) -> bool + Send + Sync + 'static,
    {
        self.rule(move |v| v.chars().any(&pred), msg)
    }

    /// Require every character to satisfy `pred`, and at least one character.
    pub fn only_chars<P>(self, pred: P, msg: impl Into<String>) -> Self
    where
        P: Fn(char) -> bool + Send + Sync + 'static,
    {
        self.rule(move |v| !v.is_empty() && v.chars().all(&pred), msg)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;

    static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

    #[test]
    fn test_empty_chain_is_valid() {
        assert_eq!(RuleChain::text().check("anything"), ValidationResult::Valid);
    }

    #[test]
    fn test_first_failure_wins() {
        let chain = RuleChain::text()
            .required("required")
            .min_length(4, "too short")
            .pattern(&DIGITS, "digits only");

        assert_eq!(chain.check("").message(), Some("required"));
        assert_eq!(chain.check("ab").message(), Some("too short"));
        assert_eq!(chain.check("abcd").message(), Some("digits only"));
        assert!(chain.check("1234").is_valid());
    }

    #[test]
    fn test_required_trims_but_present_does_not() {
        assert!(RuleChain::text().required("r").check("   ").is_invalid());
        assert!(RuleChain::text().present("r").check("   ").is_valid());
        assert!(RuleChain::text().present("r").check("").is_invalid());
    }

    #[test]
    fn test_min_length_counts_utf16_units() {
        let chain = RuleChain::text().min_length(3, "short");
        // BMP characters count once regardless of their UTF-8 width.
        assert!(chain.check("héé").is_valid());
        assert!(chain.check("hé").is_invalid());
        // Astral characters count as a surrogate pair.
        assert!(chain.check("😀a").is_valid());
        assert!(chain.check("😀").is_invalid());
    }

    #[test]
    fn test_char_rules() {
        let chain = RuleChain::text()
            .contains_char(|c| c.is_ascii_digit(), "needs digit")
            .only_chars(|c| c.is_ascii_alphanumeric(), "alnum only");

        assert_eq!(chain.check("abc").message(), Some("needs digit"));
        assert_eq!(chain.check("ab1!").message(), Some("alnum only"));
        assert!(chain.check("ab1").is_valid());
    }

    #[test]
    fn test_custom_rule_over_other_types() {
        let chain = RuleChain::<Option<u32>>::new()
            .rule(|v| v.is_some(), "missing")
            .rule(|v| v.is_some_and(|n| n < 10), "too big");

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.check(&None).message(), Some("missing"));
        assert_eq!(chain.check(&Some(12)).message(), Some("too big"));
        assert!(chain.check(&Some(3)).is_valid());
    }
}
