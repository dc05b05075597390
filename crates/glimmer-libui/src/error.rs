use glimmer_toolkit::ToolkitError;
use thiserror::Error;

/// Errors raised by control proxies and the application context.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProxyError {
    /// The proxy was destroyed; its native handle is gone.
    #[error("{kind} proxy used after destroy")]
    Destroyed { kind: String },

    #[error("invalid arguments for {kind}: {reason}")]
    InvalidArguments { kind: String, reason: String },

    /// The control sits in a parent's child slot; destroy it through the parent.
    #[error("{kind} is attached to a parent")]
    Attached { kind: String },

    #[error("{kind} cannot hold children")]
    NotAContainer { kind: String },

    #[error("{kind} already has a child")]
    ChildLimit { kind: String },

    #[error("unknown enum family '{family}'")]
    UnknownEnum { family: String },

    #[error(transparent)]
    Toolkit(#[from] ToolkitError),
}

pub type ProxyResult<T> = Result<T, ProxyError>;
