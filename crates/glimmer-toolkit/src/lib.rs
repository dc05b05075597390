//! Glimmer toolkit crate.
//!
//! This crate owns the opaque native GUI capability used by the proxy layer:
//! handles, construction arguments, callback storage and the [`Toolkit`]
//! contract. The libui bindings live behind the `libui` feature; an in-memory
//! recording toolkit for tests lives behind the `testing` feature.

pub mod arg;
pub mod callback;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod handle;
pub mod logging;
pub mod toolkit;

#[cfg(feature = "libui")]
pub mod native;
#[cfg(feature = "testing")]
pub mod testing;

pub use arg::Arg;
pub use callback::{CallbackClosure, NativeType, Signature, CONTINUE};
pub use catalog::{ContainerKind, ControlSpec, ParamKind};
pub use error::ToolkitError;
pub use handle::NativeHandle;
pub use toolkit::Toolkit;
