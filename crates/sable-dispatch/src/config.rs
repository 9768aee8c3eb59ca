use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How concrete dispatch picks between default methods inherited from
/// unrelated interfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiamondPolicy {
    /// Take the first maximally specific default method in breadth-first
    /// discovery order. This accepts hierarchies the JVM would reject.
    #[default]
    DiscoveryOrder,
    /// Follow the JVM's maximally-specific rule. Abstract interface
    /// re-declarations compete with default methods: more than one maximally
    /// specific declaration fails with `AmbiguousDefaultMethod`, and a single
    /// abstract one leaves the method unimplemented.
    Strict,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Tie-break for default methods from unrelated interfaces.
    pub diamond: DiamondPolicy,
}

impl DispatchConfig {
    pub fn strict() -> Self {
        Self {
            diamond: DiamondPolicy::Strict,
        }
    }
}
