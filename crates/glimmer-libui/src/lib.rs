//! Glimmer LibUI — control proxies on top of `glimmer-toolkit`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use glimmer_libui::prelude::*;
//! use glimmer_toolkit::native::NativeToolkit;
//!
//! let app = Application::new(Rc::new(NativeToolkit::init()?));
//! let window = WindowProxy::new(&app, vec!["Basic".into(), 320.into(), 240.into()]);
//!
//! let mut column = ControlProxy::new(&app, "vertical_box", vec![]);
//! column
//!     .add_child(ControlProxy::new(&app, "button", vec!["Quit".into()]))?
//!     .handle_listener("on_clicked", {
//!         let app = app.clone();
//!         move || { app.quit(); None }
//!     })?;
//! window.add_child(column)?;
//!
//! window.show()?; // blocks until the loop exits
//! ```
//!
//! # Callback lifetime
//!
//! Every closure handed to the toolkit is owned on the Rust side for as long
//! as the toolkit may call it: listeners by their proxy, `queue_main`
//! closures until they fire, timers by the [`Application`].

pub mod app;
pub mod color;
pub mod convert;
pub mod enums;
pub mod error;
pub mod proxy;

pub use app::{Application, RunState};
pub use color::{hex_to_rgb, interpret_color, ColorInput, ColorSpec};
pub use error::{ProxyError, ProxyResult};
pub use proxy::{ControlProxy, WindowProxy};

/// Everything needed to build windows and controls.
pub mod prelude {
    pub use crate::app::{Application, RunState};
    pub use crate::color::{hex_to_rgb, interpret_color, ColorInput, ColorSpec};
    pub use crate::convert::{boolean_to_integer, degrees_to_radians, integer_to_boolean};
    pub use crate::enums::EnumValue;
    pub use crate::error::{ProxyError, ProxyResult};
    pub use crate::proxy::{ControlProxy, ProxyState, WindowProxy};

    pub use glimmer_toolkit::logging::{init_logging, LoggingConfig};
    pub use glimmer_toolkit::{Arg, NativeHandle, Toolkit};
}
