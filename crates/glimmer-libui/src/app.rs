use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use glimmer_toolkit::{CallbackClosure, Signature, Toolkit, CONTINUE};

use crate::enums::{EnumRegistry, EnumValue};
use crate::error::ProxyResult;

// ── RunState ──────────────────────────────────────────────────────────────

/// Where the application is relative to the toolkit's blocking run loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RunState {
    NotStarted,
    Running,
    Stopped,
}

// ── Application ───────────────────────────────────────────────────────────

/// Shared context of every proxy: the toolkit, run-loop state, enum cache
/// and the storage that keeps callbacks alive.
///
/// Cheap to clone; all clones refer to the same context. Single-threaded:
/// every method must be called on the thread that runs the loop.
///
/// # Example
/// ```rust,ignore
/// let app = Application::new(Rc::new(NativeToolkit::init()?));
/// let window = WindowProxy::new(&app, vec!["Hello".into(), 300.into(), 200.into()]);
/// window.add_child(ControlProxy::new(&app, "label", vec!["Hi there".into()]))?;
/// app.timer(1.0, || log::info!("tick"));
/// window.show()?; // blocks until the window closes
/// ```
#[derive(Clone)]
pub struct Application {
    inner: Rc<AppInner>,
}

struct AppInner {
    toolkit: Rc<dyn Toolkit>,
    run_state: Cell<RunState>,
    enums: EnumRegistry,
    /// Depth of bridged callbacks currently executing.
    callback_depth: Cell<usize>,
    /// Listener closures released while a callback was running.
    retired: RefCell<Vec<CallbackClosure>>,
    /// `queue_main` one-shots; pruned once fired.
    queued: RefCell<Vec<CallbackClosure>>,
    /// Timers live as long as the application.
    timers: RefCell<Vec<CallbackClosure>>,
    /// Listeners of proxies dropped without `destroy`; their native controls
    /// may still call them.
    orphans: RefCell<Vec<CallbackClosure>>,
}

impl Application {
    pub fn new(toolkit: Rc<dyn Toolkit>) -> Self {
        Self {
            inner: Rc::new(AppInner {
                toolkit,
                run_state: Cell::new(RunState::NotStarted),
                enums: EnumRegistry::new(),
                callback_depth: Cell::new(0),
                retired: RefCell::new(Vec::new()),
                queued: RefCell::new(Vec::new()),
                timers: RefCell::new(Vec::new()),
                orphans: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn toolkit(&self) -> &dyn Toolkit {
        self.inner.toolkit.as_ref()
    }

    pub fn run_state(&self) -> RunState {
        self.inner.run_state.get()
    }

    // ── callback bridge ───────────────────────────────────────────────────

    /// Wraps `f` into a closure the toolkit can call with `signature`.
    ///
    /// Tracks callback nesting so storage is never released from inside a
    /// running callback.
    pub fn bridge(&self, signature: Signature, mut f: impl FnMut() -> i32 + 'static) -> CallbackClosure {
        let app = Rc::downgrade(&self.inner);
        CallbackClosure::new(signature, move || {
            let _guard = app.upgrade().map(CallbackGuard::enter);
            f()
        })
    }

    /// Schedules `f` to run once on the UI thread at the next loop iteration.
    pub fn queue_main(&self, f: impl FnOnce() + 'static) {
        self.release_idle();
        let mut f = Some(f);
        let closure = self.bridge(Signature::scheduled(), move || {
            if let Some(f) = f.take() {
                f();
            }
            CONTINUE
        });
        self.toolkit().queue_main(&closure);
        self.inner.queued.borrow_mut().push(closure);
    }

    /// Runs `f` every `seconds` for the rest of the application's life.
    ///
    /// The bridge always answers [`CONTINUE`], so timers cannot cancel
    /// themselves.
    pub fn timer(&self, seconds: f64, mut f: impl FnMut() + 'static) {
        self.release_idle();
        let closure = self.bridge(Signature::scheduled(), move || {
            f();
            CONTINUE
        });
        self.toolkit().timer(seconds * 1000.0, &closure);
        self.inner.timers.borrow_mut().push(closure);
    }

    /// Asks the toolkit to leave its run loop.
    pub fn quit(&self) {
        log::debug!("quit requested");
        self.toolkit().quit();
    }

    /// Takes ownership of a closure the toolkit no longer references.
    ///
    /// Dropped at once when no callback is running, otherwise kept until the
    /// next idle point.
    pub(crate) fn retire(&self, closure: CallbackClosure) {
        self.inner.retired.borrow_mut().push(closure);
        self.release_idle();
    }

    /// Keeps closures alive for the rest of the application's life.
    pub(crate) fn adopt(&self, closures: impl IntoIterator<Item = CallbackClosure>) {
        self.inner.orphans.borrow_mut().extend(closures);
    }

    /// Releases retired closures and fired one-shots when no callback is on
    /// the stack.
    fn release_idle(&self) {
        if self.inner.callback_depth.get() > 0 {
            return;
        }
        let retired = std::mem::take(&mut *self.inner.retired.borrow_mut());
        self.inner.queued.borrow_mut().retain(|c| c.invocations() == 0);
        if !retired.is_empty() {
            log::trace!("released {} retired callbacks", retired.len());
        }
    }

    // ── run loop ──────────────────────────────────────────────────────────

    /// Enters the blocking run loop unless it already ran or is running.
    ///
    /// Returns whether the loop was entered.
    pub(crate) fn run_main_loop(&self) -> bool {
        match self.run_state() {
            RunState::NotStarted => {}
            RunState::Running => return false,
            RunState::Stopped => {
                log::warn!("run loop already stopped; not entering it again");
                return false;
            }
        }
        self.inner.run_state.set(RunState::Running);
        self.toolkit().main();
        self.toolkit().quit();
        self.inner.run_state.set(RunState::Stopped);
        self.release_idle();
        true
    }

    // ── enums ─────────────────────────────────────────────────────────────

    /// Snake-case member names of an enum family.
    pub fn enum_symbols(&self, family: &str) -> Vec<String> {
        self.inner
            .enums
            .symbols(self.toolkit(), family)
            .iter()
            .map(|s| s.name.clone())
            .collect()
    }

    pub fn enum_symbol_to_value(
        &self,
        family: &str,
        value: impl Into<EnumValue>,
        default_index: usize,
    ) -> ProxyResult<i64> {
        self.inner.enums.symbol_to_value(self.toolkit(), family, value, default_index)
    }

    #[cfg(test)]
    pub(crate) fn pending_callbacks(&self) -> (usize, usize, usize) {
        (
            self.inner.retired.borrow().len(),
            self.inner.queued.borrow().len(),
            self.inner.timers.borrow().len(),
        )
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("run_state", &self.run_state())
            .field("callback_depth", &self.inner.callback_depth.get())
            .finish()
    }
}

struct CallbackGuard(Rc<AppInner>);

impl CallbackGuard {
    fn enter(inner: Rc<AppInner>) -> Self {
        inner.callback_depth.set(inner.callback_depth.get() + 1);
        Self(inner)
    }
}

impl Drop for CallbackGuard {
    fn drop(&mut self) {
        self.0.callback_depth.set(self.0.callback_depth.get() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimmer_toolkit::testing::{Call, RecordingToolkit};

    fn app() -> (Rc<RecordingToolkit>, Application) {
        let tk = Rc::new(RecordingToolkit::new());
        let app = Application::new(tk.clone());
        (tk, app)
    }

    // ── queue_main ────────────────────────────────────────────────────────

    #[test]
    fn queued_closure_stays_alive_until_it_fires() {
        let (tk, app) = app();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        app.queue_main(move || h.set(h.get() + 1));
        assert_eq!(app.pending_callbacks().1, 1);

        tk.script(|tk| tk.quit());
        assert!(app.run_main_loop());
        assert_eq!(hits.get(), 1);
        assert_eq!(app.pending_callbacks().1, 0);
    }

    #[test]
    fn queue_main_from_a_callback_keeps_the_running_one() {
        let (tk, app) = app();
        let hits = Rc::new(Cell::new(0));
        let (outer_app, h) = (app.clone(), hits.clone());
        app.queue_main(move || {
            let h = h.clone();
            outer_app.queue_main(move || h.set(h.get() + 1));
        });
        tk.script(|tk| tk.quit());
        app.run_main_loop();
        assert_eq!(hits.get(), 1);
    }

    // ── timer ─────────────────────────────────────────────────────────────

    #[test]
    fn timer_always_continues() {
        let tk = Rc::new(RecordingToolkit::new().with_max_ticks(4));
        let app = Application::new(tk.clone());
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        app.timer(0.5, move || h.set(h.get() + 1));
        assert!(tk.calls().contains(&Call::Timer { milliseconds: 500.0 }));

        app.run_main_loop();
        assert_eq!(hits.get(), 4);
        assert_eq!(app.pending_callbacks().2, 1);
    }

    // ── run loop ──────────────────────────────────────────────────────────

    #[test]
    fn loop_runs_once_then_stops() {
        let (tk, app) = app();
        assert_eq!(app.run_state(), RunState::NotStarted);
        assert!(app.run_main_loop());
        assert_eq!(app.run_state(), RunState::Stopped);
        assert!(!app.run_main_loop());
        assert_eq!(tk.count(|c| *c == Call::Main), 1);
        assert_eq!(tk.calls().last(), Some(&Call::Quit));
    }

    #[test]
    fn state_is_running_inside_the_loop() {
        let (tk, app) = app();
        let seen = Rc::new(Cell::new(RunState::NotStarted));
        let (a, s) = (app.clone(), seen.clone());
        app.queue_main(move || s.set(a.run_state()));
        tk.script(|tk| tk.quit());
        app.run_main_loop();
        assert_eq!(seen.get(), RunState::Running);
    }

    // ── enums ─────────────────────────────────────────────────────────────

    #[test]
    fn enum_helpers_use_toolkit_constants() {
        let (_tk, app) = app();
        assert_eq!(app.enum_symbols("draw_fill_mode"), ["winding", "alternate"]);
        assert_eq!(app.enum_symbol_to_value("draw_fill_mode", "alternate", 0), Ok(1));
    }
}
