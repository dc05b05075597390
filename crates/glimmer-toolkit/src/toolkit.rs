use crate::arg::Arg;
use crate::callback::{CallbackClosure, Signature};
use crate::catalog;
use crate::constants::ENUM_CONSTANTS;
use crate::error::ToolkitError;
use crate::handle::NativeHandle;

/// The native GUI toolkit as seen by the proxy layer.
///
/// Implementations are not thread-safe; every call must happen on the thread
/// that runs [`main`](Toolkit::main).
///
/// Closures passed by reference are registered by their data pointer. The
/// caller keeps them alive for as long as the toolkit may invoke them.
pub trait Toolkit {
    /// `new_<kind>(args...)`. `args` are complete (defaults already applied).
    fn new_control(&self, kind: &str, args: &[Arg]) -> Result<NativeHandle, ToolkitError>;

    fn show_control(&self, handle: NativeHandle);

    /// Releases the native control. The handle is invalid afterwards.
    fn destroy_control(&self, handle: NativeHandle);

    /// `<container>_set_child(parent, child | null)`.
    fn set_child(
        &self,
        container: &str,
        parent: NativeHandle,
        child: Option<NativeHandle>,
    ) -> Result<(), ToolkitError>;

    /// `<container>_append(parent, child, args...)`.
    fn append_child(
        &self,
        container: &str,
        parent: NativeHandle,
        child: NativeHandle,
        args: &[Arg],
    ) -> Result<(), ToolkitError>;

    /// `<container>_delete(parent, index)`.
    fn delete_child(&self, container: &str, parent: NativeHandle, index: usize) -> Result<(), ToolkitError>;

    /// `<control>_<event>(handle, closure)`. Replaces any previous handler.
    fn connect(
        &self,
        control: &str,
        event: &str,
        handle: NativeHandle,
        closure: &CallbackClosure,
    ) -> Result<(), ToolkitError>;

    /// Runs `closure` once on the UI thread at the next loop iteration.
    fn queue_main(&self, closure: &CallbackClosure);

    /// Runs `closure` every `milliseconds` while it returns [`CONTINUE`].
    ///
    /// [`CONTINUE`]: crate::callback::CONTINUE
    fn timer(&self, milliseconds: f64, closure: &CallbackClosure);

    /// Blocking run loop; returns after [`quit`](Toolkit::quit).
    fn main(&self);

    fn quit(&self);

    /// Signature expected by `<control>_<event>` callbacks.
    fn event_signature(&self, control: &str, event: &str) -> Result<Signature, ToolkitError> {
        catalog::event_signature(control, event)
    }

    /// Named integer enum constants, grouped by family prefix.
    fn constants(&self) -> &[(&'static str, i64)] {
        ENUM_CONSTANTS
    }
}
