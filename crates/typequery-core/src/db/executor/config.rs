use serde::{Deserialize, Serialize};

const DEFAULT_MAX_GROUPS: u64 = 10_000;

///
/// ExecutionConfig
///
/// Hard limits applied by the in-memory evaluator. Plain data so hosts can
/// load it from their own configuration; missing keys take the defaults.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Upper bound on the groups one grouped evaluation may form.
    pub max_groups: u64,
}

impl ExecutionConfig {
    #[must_use]
    pub const fn with_max_groups(max_groups: u64) -> Self {
        Self { max_groups }
    }

    /// No grouping limit.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::with_max_groups(u64::MAX)
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::with_max_groups(DEFAULT_MAX_GROUPS)
    }
}
