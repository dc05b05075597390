use thiserror::Error;

/// Failures reported by a [`Toolkit`](crate::Toolkit) implementation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ToolkitError {
    #[error("unsupported control '{0}'")]
    UnsupportedControl(String),

    #[error("control '{control}' has no '{event}' event")]
    UnsupportedEvent { control: String, event: String },

    #[error("control '{0}' cannot hold children")]
    UnsupportedContainer(String),

    #[error("invalid arguments for '{control}': {reason}")]
    InvalidArguments { control: String, reason: String },

    #[error("toolkit returned a null handle for '{0}'")]
    NullHandle(String),

    #[error("toolkit initialization failed: {0}")]
    Init(String),
}
