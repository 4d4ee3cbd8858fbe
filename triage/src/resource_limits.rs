/// Resource limits applied while loading a rule base
///
/// These limits protect against runaway rule files while being generous
/// enough for any hand-written knowledge base.
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// Maximum rule file size in bytes
    /// Real usage: ~1KB, Limit: 1MB
    pub max_rule_file_bytes: usize,

    /// Maximum number of rules in one rule base
    pub max_rules: usize,

    /// Maximum number of condition patterns in a single rule
    pub max_conditions_per_rule: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_rule_file_bytes: 1024 * 1024, // 1 MB
            max_rules: 1000,
            max_conditions_per_rule: 64,
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
