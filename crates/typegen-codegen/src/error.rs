use thiserror::Error;

use crate::registry::Target;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("unknown target '{0}' (expected one of: typescript, kotlin, java, csharp)")]
    UnknownTarget(String),

    #[error("unknown component policy '{0}' (expected one of: default, suppress, emit)")]
    UnknownPolicy(String),

    #[error("no backend registered for target {0}")]
    UnregisteredTarget(Target),
}
