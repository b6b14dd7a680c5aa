use serde::{Deserialize, Serialize};

/// How a window manipulation command is delivered.
///
/// The set is closed on purpose: the dispatcher matches exhaustively
/// on it, so adding a variant forces every handler to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManipulationMethod {
    /// The native accessibility/window API supplied by the caller.
    PrimaryApi,
    /// The scripting channel, scoped to application name + title.
    ScriptingFallback,
    /// Up to three primary attempts with increasing inter-attempt delay.
    PrimaryWithRetry,
    /// Small interpolated steps from the current to the target position.
    GradualMovement,
}

impl ManipulationMethod {
    /// All methods, in the fixed order used for deterministic
    /// statistics tie-breaking.
    pub const ALL: [ManipulationMethod; 4] = [
        ManipulationMethod::PrimaryApi,
        ManipulationMethod::ScriptingFallback,
        ManipulationMethod::PrimaryWithRetry,
        ManipulationMethod::GradualMovement,
    ];

    /// Short name for log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryApi => "primary",
            Self::ScriptingFallback => "script",
            Self::PrimaryWithRetry => "retry",
            Self::GradualMovement => "gradual",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_snake_case() {
        let toml = "method = \"scripting_fallback\"";
        #[derive(Deserialize)]
        struct Row {
            method: ManipulationMethod,
        }
        let row: Row = toml::from_str(toml).unwrap();
        assert_eq!(row.method, ManipulationMethod::ScriptingFallback);
    }
}
