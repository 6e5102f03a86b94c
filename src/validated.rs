use crate::rule::ValidationRule;

// ------------- RuleValidator -------------
/// A string value checked against an ordered list of rules.
///
/// The rules are fixed at construction. Writing the value marks the
/// validator dirty, whether or not the new value differs from the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleValidator {
    value: String,
    rules: Vec<ValidationRule>,
    dirty: bool,
}

impl RuleValidator {
    pub fn new(value: impl Into<String>, rules: Vec<ValidationRule>) -> Self {
        Self {
            value: value.into(),
            rules,
            dirty: false,
        }
    }
    /// An empty field, which is how most form inputs start out.
    pub fn empty(rules: Vec<ValidationRule>) -> Self {
        Self::new(String::new(), rules)
    }
    pub fn value(&self) -> &str {
        &self.value
    }
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }
    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
    /// Evaluates every rule against the current value. Nothing is cached and
    /// no rule short-circuits another, so all failures are reported in rule
    /// order.
    pub fn projection(&self) -> ValidationState {
        let mut errors = Vec::new();
        let mut failed_rules = Vec::new();
        for rule in &self.rules {
            if !rule.validate(&self.value) {
                errors.push(rule.error_message());
                failed_rules.push(rule.clone());
            }
        }
        ValidationState {
            is_valid: errors.is_empty(),
            errors,
            is_dirty: self.dirty,
            failed_rules,
        }
    }
}

// ------------- ValidationState -------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationState {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub is_dirty: bool,
    pub failed_rules: Vec<ValidationRule>,
}

impl ValidationState {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            is_dirty: false,
            failed_rules: Vec::new(),
        }
    }
    pub fn invalid(errors: Vec<String>, failed_rules: Vec<ValidationRule>) -> Self {
        Self {
            is_valid: false,
            errors,
            is_dirty: true,
            failed_rules,
        }
    }
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}
