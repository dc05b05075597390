//! In-memory [`Toolkit`] that records every call.
//!
//! Handles are sequential ids. Registered closures are kept by data pointer,
//! exactly like the native toolkit, so [`RecordingToolkit::fire`] exercises
//! the same lifetime contract: the registering side must keep the
//! [`CallbackClosure`] alive.
//!
//! [`main`](Toolkit::main) simulates the blocking loop: each tick drains the
//! queue-main closures, runs the next scripted step and fires every timer
//! once, until [`quit`](Toolkit::quit) is called or the tick budget runs out.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::ffi::c_void;

use crate::arg::Arg;
use crate::callback::{CallbackClosure, CONTINUE};
use crate::catalog;
use crate::error::ToolkitError;
use crate::handle::NativeHandle;
use crate::toolkit::Toolkit;

/// One recorded toolkit call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    New { kind: String, handle: NativeHandle, args: Vec<Arg> },
    Show(NativeHandle),
    Destroy(NativeHandle),
    SetChild { container: String, parent: NativeHandle, child: Option<NativeHandle> },
    Append { container: String, parent: NativeHandle, child: NativeHandle, args: Vec<Arg> },
    Delete { container: String, parent: NativeHandle, index: usize },
    Connect { control: String, event: String, handle: NativeHandle },
    QueueMain,
    Timer { milliseconds: f64 },
    Main,
    Quit,
}

type Step = Box<dyn FnOnce(&RecordingToolkit)>;

pub struct RecordingToolkit {
    calls: RefCell<Vec<Call>>,
    next_handle: Cell<usize>,
    live: RefCell<HashSet<NativeHandle>>,
    listeners: RefCell<HashMap<(NativeHandle, String), *mut c_void>>,
    queued: RefCell<VecDeque<*mut c_void>>,
    timers: RefCell<Vec<*mut c_void>>,
    script: RefCell<VecDeque<Step>>,
    quit_requested: Cell<bool>,
    max_ticks: Cell<usize>,
}

impl RecordingToolkit {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_handle: Cell::new(1),
            live: RefCell::new(HashSet::new()),
            listeners: RefCell::new(HashMap::new()),
            queued: RefCell::new(VecDeque::new()),
            timers: RefCell::new(Vec::new()),
            script: RefCell::new(VecDeque::new()),
            quit_requested: Cell::new(false),
            max_ticks: Cell::new(8),
        }
    }

    /// Upper bound on simulated loop iterations per `main` call.
    pub fn with_max_ticks(self, ticks: usize) -> Self {
        self.max_ticks.set(ticks);
        self
    }

    /// Queues a step to run inside the next simulated `main`, one per tick.
    pub fn script(&self, step: impl FnOnce(&RecordingToolkit) + 'static) {
        self.script.borrow_mut().push_back(Box::new(step));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn is_live(&self, handle: NativeHandle) -> bool {
        self.live.borrow().contains(&handle)
    }

    pub fn has_listener(&self, handle: NativeHandle, event: &str) -> bool {
        self.listeners.borrow().contains_key(&(handle, event.to_string()))
    }

    /// Simulates the toolkit raising `event` on `handle`.
    ///
    /// Returns `None` if nothing is connected.
    pub fn fire(&self, handle: NativeHandle, event: &str) -> Option<i32> {
        let data = self.listeners.borrow().get(&(handle, event.to_string())).copied()?;
        Some(unsafe { CallbackClosure::invoke_data(data) })
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn assert_live(&self, handle: NativeHandle) {
        assert!(self.is_live(handle), "{handle:?} used after destroy");
    }

    fn tick(&self) {
        loop {
            let next = self.queued.borrow_mut().pop_front();
            let Some(data) = next else { break };
            unsafe { CallbackClosure::invoke_data(data) };
            if self.quit_requested.get() {
                return;
            }
        }

        let step = self.script.borrow_mut().pop_front();
        if let Some(step) = step {
            step(self);
            if self.quit_requested.get() {
                return;
            }
        }

        let timers = self.timers.borrow().clone();
        let mut keep = Vec::with_capacity(timers.len());
        for data in timers {
            if unsafe { CallbackClosure::invoke_data(data) } == CONTINUE {
                keep.push(data);
            }
        }
        *self.timers.borrow_mut() = keep;
    }
}

impl Default for RecordingToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolkit for RecordingToolkit {
    fn new_control(&self, kind: &str, args: &[Arg]) -> Result<NativeHandle, ToolkitError> {
        catalog::validate_args(kind, args)?;
        let handle = NativeHandle::from_raw(self.next_handle.get());
        self.next_handle.set(handle.raw() + 1);
        self.live.borrow_mut().insert(handle);
        self.record(Call::New { kind: kind.to_string(), handle, args: args.to_vec() });
        Ok(handle)
    }

    fn show_control(&self, handle: NativeHandle) {
        self.assert_live(handle);
        self.record(Call::Show(handle));
    }

    fn destroy_control(&self, handle: NativeHandle) {
        self.assert_live(handle);
        self.live.borrow_mut().remove(&handle);
        self.listeners.borrow_mut().retain(|(h, _), _| *h != handle);
        self.record(Call::Destroy(handle));
    }

    fn set_child(
        &self,
        container: &str,
        parent: NativeHandle,
        child: Option<NativeHandle>,
    ) -> Result<(), ToolkitError> {
        if catalog::container_kind(container)? != Some(catalog::ContainerKind::Single) {
            return Err(ToolkitError::UnsupportedContainer(container.to_string()));
        }
        self.assert_live(parent);
        self.record(Call::SetChild { container: container.to_string(), parent, child });
        Ok(())
    }

    fn append_child(
        &self,
        container: &str,
        parent: NativeHandle,
        child: NativeHandle,
        args: &[Arg],
    ) -> Result<(), ToolkitError> {
        if catalog::container_kind(container)? != Some(catalog::ContainerKind::Sequence) {
            return Err(ToolkitError::UnsupportedContainer(container.to_string()));
        }
        self.assert_live(parent);
        self.assert_live(child);
        self.record(Call::Append { container: container.to_string(), parent, child, args: args.to_vec() });
        Ok(())
    }

    fn delete_child(&self, container: &str, parent: NativeHandle, index: usize) -> Result<(), ToolkitError> {
        if catalog::container_kind(container)? != Some(catalog::ContainerKind::Sequence) {
            return Err(ToolkitError::UnsupportedContainer(container.to_string()));
        }
        self.assert_live(parent);
        self.record(Call::Delete { container: container.to_string(), parent, index });
        Ok(())
    }

    fn connect(
        &self,
        control: &str,
        event: &str,
        handle: NativeHandle,
        closure: &CallbackClosure,
    ) -> Result<(), ToolkitError> {
        self.event_signature(control, event)?;
        self.assert_live(handle);
        self.listeners.borrow_mut().insert((handle, event.to_string()), closure.data());
        self.record(Call::Connect { control: control.to_string(), event: event.to_string(), handle });
        Ok(())
    }

    fn queue_main(&self, closure: &CallbackClosure) {
        self.queued.borrow_mut().push_back(closure.data());
        self.record(Call::QueueMain);
    }

    fn timer(&self, milliseconds: f64, closure: &CallbackClosure) {
        self.timers.borrow_mut().push(closure.data());
        self.record(Call::Timer { milliseconds });
    }

    fn main(&self) {
        self.record(Call::Main);
        self.quit_requested.set(false);
        for _ in 0..self.max_ticks.get() {
            self.tick();
            if self.quit_requested.get() {
                break;
            }
        }
    }

    fn quit(&self) {
        self.quit_requested.set(true);
        self.record(Call::Quit);
    }
}
