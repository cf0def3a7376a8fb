use crate::SwapStrategy;
use serde::Serialize;

/// What a successful patch did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swapped {
    pub target: String,
    pub strategy: SwapStrategy,
}

/// Terminal state of one invocation.
///
/// Failures have already been logged and, where the user must hear about
/// them, alerted by the time an `Outcome` exists. Callers may inspect it
/// but are never required to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Swapped(Swapped),
    InvalidAction { message: String },
    TransportFailed { message: String },
    ServerRejected { status: u16 },
    MissingTarget,
    TargetNotFound { selector: String },
    UnknownSwap { keyword: String },
    PatchFailed { message: String },
}

impl Outcome {
    pub fn is_swapped(&self) -> bool {
        matches!(self, Outcome::Swapped(_))
    }
}
