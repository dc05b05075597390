//! Managed proxies for native controls.

pub mod control;
pub mod window;

pub use control::{ControlProxy, ProxyState};
pub use window::{window_args, WindowProxy, DEFAULT_HAS_MENUBAR, DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH};
