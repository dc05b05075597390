use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use glimmer_toolkit::{Arg, NativeHandle};

use crate::app::Application;
use crate::convert::boolean_to_integer;
use crate::error::{ProxyError, ProxyResult};
use crate::proxy::control::{ControlProxy, ProxyState};

pub const DEFAULT_TITLE: &str = "Glimmer";
pub const DEFAULT_WIDTH: i64 = 150;
pub const DEFAULT_HEIGHT: i64 = 150;
pub const DEFAULT_HAS_MENUBAR: i64 = 1;

/// Proxy for a top-level window.
///
/// A window holds at most one child, closes cleanly by default (destroy then
/// quit) and owns entry into the application's run loop: the first
/// [`show`](Self::show) blocks until the loop exits.
///
/// Cheap to clone; clones share the same window.
#[derive(Clone)]
pub struct WindowProxy(Rc<RefCell<WindowInner>>);

struct WindowInner {
    control: ControlProxy,
    shown_at_least_once: bool,
    this: Weak<RefCell<WindowInner>>,
}

type ClosingListener = Box<dyn FnMut(&WindowProxy) -> Option<i32>>;

impl WindowProxy {
    /// `args` are `[title, width, height, has_menubar]`; trailing ones may be
    /// omitted and are defaulted when the native window is built.
    pub fn new(app: &Application, args: Vec<Arg>) -> Self {
        Self(Rc::new_cyclic(|this| {
            RefCell::new(WindowInner {
                control: ControlProxy::new(app, "window", args),
                shown_at_least_once: false,
                this: this.clone(),
            })
        }))
    }

    pub fn app(&self) -> Application {
        self.0.borrow().control.app().clone()
    }

    pub fn state(&self) -> ProxyState {
        self.0.borrow().control.state()
    }

    pub fn is_destroyed(&self) -> bool {
        self.0.borrow().control.is_destroyed()
    }

    pub fn shown_at_least_once(&self) -> bool {
        self.0.borrow().shown_at_least_once
    }

    /// Construction arguments; complete once the window has been built.
    pub fn args(&self) -> Vec<Arg> {
        self.0.borrow().control.args().to_vec()
    }

    /// The native handle, building the window on first access.
    pub fn handle(&self) -> ProxyResult<NativeHandle> {
        self.0.borrow_mut().ensure_built()
    }

    /// Sets the window's only child.
    pub fn add_child(&self, child: ControlProxy) -> ProxyResult<()> {
        let mut inner = self.0.borrow_mut();
        inner.ensure_built()?;
        inner.control.add_child(child)?;
        Ok(())
    }

    /// Runs `f` on the child, if any.
    pub fn with_child<R>(&self, f: impl FnOnce(&mut ControlProxy) -> R) -> Option<R> {
        self.0.borrow_mut().control.child_mut(0).map(f)
    }

    /// Clears the child slot, then destroys the child.
    pub fn destroy_child(&self) -> ProxyResult<()> {
        self.0.borrow_mut().control.destroy_child(0)
    }

    /// Registers the closing listener.
    ///
    /// `Some(n)` is returned to the toolkit as the closing decision. `None`
    /// destroys the window, quits the application and allows the close.
    pub fn on_closing(&self, listener: impl FnMut(&WindowProxy) -> Option<i32> + 'static) -> ProxyResult<()> {
        let mut inner = self.0.borrow_mut();
        let handle = inner.ensure_built()?;
        let wrapped = closing_listener(inner.this.clone(), Some(Box::new(listener)));
        inner.control.connect_listener(handle, "on_closing", wrapped)
    }

    /// Shows the window. The first show of a window enters the blocking run
    /// loop if the application has not run it yet, and quits on loop exit.
    pub fn show(&self) -> ProxyResult<()> {
        let (app, first_show) = {
            let mut inner = self.0.borrow_mut();
            inner.ensure_built()?;
            inner.control.show()?;
            let first_show = !inner.shown_at_least_once;
            inner.shown_at_least_once = true;
            (inner.control.app().clone(), first_show)
        };
        if first_show {
            app.run_main_loop();
        }
        Ok(())
    }

    pub fn destroy(&self) -> ProxyResult<()> {
        self.0.borrow_mut().control.destroy()
    }
}

impl WindowInner {
    fn ensure_built(&mut self) -> ProxyResult<NativeHandle> {
        if let Some(handle) = self.control.constructed_handle()? {
            return Ok(handle);
        }
        let args = window_args(self.control.args())?;
        let handle = self.control.construct_with(args)?;
        let default = closing_listener(self.this.clone(), None);
        self.control.connect_listener(handle, "on_closing", default)?;
        Ok(handle)
    }
}

/// Fills omitted trailing window arguments and turns a boolean menubar flag
/// into the toolkit's integer boolean.
pub fn window_args(args: &[Arg]) -> ProxyResult<Vec<Arg>> {
    if args.len() > 4 {
        return Err(ProxyError::InvalidArguments {
            kind: "window".to_string(),
            reason: format!("expected at most 4 arguments, got {}", args.len()),
        });
    }
    let mut args = args.to_vec();
    if args.is_empty() {
        args.push(Arg::from(DEFAULT_TITLE));
    }
    if args.len() == 1 {
        args.push(Arg::Int(DEFAULT_WIDTH));
    }
    if args.len() == 2 {
        args.push(Arg::Int(DEFAULT_HEIGHT));
    }
    if args.len() == 3 {
        args.push(Arg::Int(DEFAULT_HAS_MENUBAR));
    }
    if let Some(menubar) = args[3].as_bool() {
        args[3] = Arg::Int(boolean_to_integer(Some(menubar), false).unwrap_or_default());
    }
    Ok(args)
}

fn closing_listener(
    this: Weak<RefCell<WindowInner>>,
    mut user: Option<ClosingListener>,
) -> impl FnMut() -> Option<i32> + 'static {
    move || {
        let Some(inner) = this.upgrade() else {
            return Some(0);
        };
        let window = WindowProxy(inner);
        if let Some(listener) = user.as_mut() {
            if let Some(decision) = listener(&window) {
                return Some(decision);
            }
        }
        let app = window.app();
        if !window.is_destroyed() {
            if let Err(e) = window.destroy() {
                log::error!("failed to destroy closing window: {e}");
            }
        }
        app.quit();
        Some(0)
    }
}

impl fmt::Debug for WindowProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(inner) => f
                .debug_struct("WindowProxy")
                .field("control", &inner.control)
                .field("shown_at_least_once", &inner.shown_at_least_once)
                .finish(),
            Err(_) => f.write_str("WindowProxy(<borrowed>)"),
        }
    }
}
