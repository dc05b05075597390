use std::collections::HashMap;
use std::fmt;

use glimmer_toolkit::catalog::container_kind;
use glimmer_toolkit::{Arg, CallbackClosure, ContainerKind, NativeHandle};

use crate::app::Application;
use crate::convert::boolean_to_integer;
use crate::error::{ProxyError, ProxyResult};

/// Lifecycle of a proxy's native control.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ProxyState {
    /// Proxy exists; the native control is built on first use.
    Unconstructed,
    Constructed(NativeHandle),
    /// Terminal. Every further use fails with [`ProxyError::Destroyed`].
    Destroyed,
}

/// Managed side of one native control.
///
/// Owns the control's native handle, its children (in attachment order) and
/// the callback closures registered on its events. Destruction is explicit
/// and top-down: [`destroy`](Self::destroy) detaches and destroys every
/// child before releasing this control's handle.
///
/// # Example
/// ```rust,ignore
/// let mut column = ControlProxy::new(&app, "vertical_box", vec![]);
/// column
///     .add_child(ControlProxy::new(&app, "button", vec!["Save".into()]))?
///     .handle_listener("on_clicked", || { save(); None })?;
/// column.add_child(ControlProxy::new(&app, "label", vec!["".into()]).stretchy(false))?;
/// ```
pub struct ControlProxy {
    app: Application,
    kind: String,
    args: Vec<Arg>,
    state: ProxyState,
    children: Vec<ControlProxy>,
    listeners: HashMap<String, CallbackClosure>,
    stretchy: bool,
    /// Set while a parent holds this control in its native child slot.
    attached: bool,
}

impl ControlProxy {
    /// Creates an unconstructed proxy; no toolkit call happens here.
    pub fn new(app: &Application, kind: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            app: app.clone(),
            kind: kind.into(),
            args,
            state: ProxyState::Unconstructed,
            children: Vec::new(),
            listeners: HashMap::new(),
            stretchy: true,
            attached: false,
        }
    }

    /// Whether this control expands when appended to a box. Defaults to `true`.
    pub fn stretchy(mut self, stretchy: bool) -> Self {
        self.stretchy = stretchy;
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn app(&self) -> &Application {
        &self.app
    }

    pub fn state(&self) -> ProxyState {
        self.state
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == ProxyState::Destroyed
    }

    pub fn children(&self) -> &[ControlProxy] {
        &self.children
    }

    /// The child stays attached; remove it with [`destroy_child`](Self::destroy_child).
    pub fn child_mut(&mut self, index: usize) -> Option<&mut ControlProxy> {
        self.children.get_mut(index)
    }

    pub fn has_listener(&self, event: &str) -> bool {
        self.listeners.contains_key(event)
    }

    /// The native handle, building the control on first access.
    pub fn handle(&mut self) -> ProxyResult<NativeHandle> {
        match self.constructed_handle()? {
            Some(handle) => Ok(handle),
            None => self.construct_with(self.args.clone()),
        }
    }

    /// `Ok(None)` while unconstructed; fails once destroyed.
    pub(crate) fn constructed_handle(&self) -> ProxyResult<Option<NativeHandle>> {
        match self.state {
            ProxyState::Unconstructed => Ok(None),
            ProxyState::Constructed(handle) => Ok(Some(handle)),
            ProxyState::Destroyed => Err(self.destroyed()),
        }
    }

    /// Builds the native control from `args` (defaults already applied).
    pub(crate) fn construct_with(&mut self, args: Vec<Arg>) -> ProxyResult<NativeHandle> {
        let handle = self.app.toolkit().new_control(&self.kind, &args)?;
        log::debug!("constructed {} {handle:?}", self.kind);
        self.args = args;
        self.state = ProxyState::Constructed(handle);
        Ok(handle)
    }

    pub fn show(&mut self) -> ProxyResult<()> {
        let handle = self.handle()?;
        self.app.toolkit().show_control(handle);
        Ok(())
    }

    // ── children ──────────────────────────────────────────────────────────

    /// Attaches `child` beneath this control and takes ownership of it.
    ///
    /// Both controls are constructed if needed. Returns the attached child.
    pub fn add_child(&mut self, mut child: ControlProxy) -> ProxyResult<&mut ControlProxy> {
        let parent = self.handle()?;
        let container = container_kind(&self.kind)?
            .ok_or_else(|| ProxyError::NotAContainer { kind: self.kind.clone() })?;
        if container == ContainerKind::Single && !self.children.is_empty() {
            return Err(ProxyError::ChildLimit { kind: self.kind.clone() });
        }
        let child_handle = child.handle()?;
        self.post_initialize_child(parent, container, &child, child_handle)?;
        child.attached = true;

        let index = self.children.len();
        self.children.push(child);
        Ok(&mut self.children[index])
    }

    fn post_initialize_child(
        &self,
        parent: NativeHandle,
        container: ContainerKind,
        child: &ControlProxy,
        child_handle: NativeHandle,
    ) -> ProxyResult<()> {
        let toolkit = self.app.toolkit();
        match container {
            ContainerKind::Single => toolkit.set_child(&self.kind, parent, Some(child_handle))?,
            ContainerKind::Sequence => {
                let stretchy = boolean_to_integer(Some(child.stretchy), false).unwrap_or_default();
                toolkit.append_child(&self.kind, parent, child_handle, &[Arg::Int(stretchy)])?;
            }
        }
        log::debug!("attached {} {child_handle:?} to {} {parent:?}", child.kind, self.kind);
        Ok(())
    }

    /// Detaches the child at `index` from the native parent, then destroys it.
    pub fn destroy_child(&mut self, index: usize) -> ProxyResult<()> {
        let parent = self.constructed_handle()?;
        if index >= self.children.len() {
            return Ok(());
        }
        let mut child = self.children.remove(index);
        child.attached = false;
        if child.is_destroyed() {
            log::warn!("{} child {index} of {} was already destroyed", child.kind, self.kind);
            return Ok(());
        }
        if let Some(parent) = parent {
            let toolkit = self.app.toolkit();
            match container_kind(&self.kind)? {
                Some(ContainerKind::Single) => toolkit.set_child(&self.kind, parent, None)?,
                Some(ContainerKind::Sequence) => toolkit.delete_child(&self.kind, parent, index)?,
                None => {}
            }
        }
        child.destroy()
    }

    // ── listeners ─────────────────────────────────────────────────────────

    /// Connects `listener` to the native `event` of this control.
    ///
    /// `Some(n)` from the listener is handed back to the toolkit as the
    /// event's result; `None` answers `0`. Registering the same event again
    /// replaces the previous listener.
    pub fn handle_listener(
        &mut self,
        event: &str,
        listener: impl FnMut() -> Option<i32> + 'static,
    ) -> ProxyResult<()> {
        let handle = self.handle()?;
        self.connect_listener(handle, event, listener)
    }

    pub(crate) fn connect_listener(
        &mut self,
        handle: NativeHandle,
        event: &str,
        mut listener: impl FnMut() -> Option<i32> + 'static,
    ) -> ProxyResult<()> {
        let toolkit = self.app.toolkit();
        let signature = toolkit.event_signature(&self.kind, event)?;
        let closure = self.app.bridge(signature, move || listener().unwrap_or(0));
        toolkit.connect(&self.kind, event, handle, &closure)?;
        log::debug!("connected {}.{event} on {handle:?}", self.kind);

        if let Some(previous) = self.listeners.insert(event.to_string(), closure) {
            self.app.retire(previous);
        }
        Ok(())
    }

    // ── destruction ───────────────────────────────────────────────────────

    /// Destroys children depth-first, then releases this control's handle.
    ///
    /// Fails with [`ProxyError::Destroyed`] if called twice and with
    /// [`ProxyError::Attached`] on a child still held by its parent; such a
    /// child is destroyed through the parent's `destroy_child`.
    ///
    /// A child that fails to destroy does not stop the rest: this control's
    /// handle is still released and the first error is returned.
    pub fn destroy(&mut self) -> ProxyResult<()> {
        let handle = self.constructed_handle()?;
        if self.attached {
            return Err(ProxyError::Attached { kind: self.kind.clone() });
        }
        let mut first_error = None;
        while !self.children.is_empty() {
            if let Err(e) = self.destroy_child(0) {
                log::error!("failed to destroy child of {}: {e}", self.kind);
                first_error.get_or_insert(e);
            }
        }
        if let Some(handle) = handle {
            self.app.toolkit().destroy_control(handle);
            log::debug!("destroyed {} {handle:?}", self.kind);
        }
        self.state = ProxyState::Destroyed;
        for (_, closure) in self.listeners.drain() {
            self.app.retire(closure);
        }
        first_error.map_or(Ok(()), Err)
    }

    fn destroyed(&self) -> ProxyError {
        ProxyError::Destroyed { kind: self.kind.clone() }
    }
}

impl Drop for ControlProxy {
    fn drop(&mut self) {
        if matches!(self.state, ProxyState::Constructed(_)) && !self.listeners.is_empty() {
            log::warn!("{} dropped without destroy; keeping its callbacks alive", self.kind);
            self.app.adopt(self.listeners.drain().map(|(_, closure)| closure));
        }
    }
}

impl fmt::Debug for ControlProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlProxy")
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("children", &self.children)
            .field("listeners", &self.listeners.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use glimmer_toolkit::testing::{Call, RecordingToolkit};
    use glimmer_toolkit::ToolkitError;

    fn app() -> (Rc<RecordingToolkit>, Application) {
        let tk = Rc::new(RecordingToolkit::new());
        let app = Application::new(tk.clone());
        (tk, app)
    }

    fn button(app: &Application, text: &str) -> ControlProxy {
        ControlProxy::new(app, "button", vec![text.into()])
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn construction_is_lazy() {
        let (tk, app) = app();
        let mut b = button(&app, "ok");
        assert_eq!(b.state(), ProxyState::Unconstructed);
        assert!(tk.calls().is_empty());

        let h = b.handle().unwrap();
        assert_eq!(b.state(), ProxyState::Constructed(h));
        assert_eq!(b.handle().unwrap(), h);
        assert_eq!(tk.count(|c| matches!(c, Call::New { .. })), 1);
    }

    #[test]
    fn bad_arguments_fail_at_first_construction() {
        let (_tk, app) = app();
        let mut b = ControlProxy::new(&app, "button", vec![]);
        let err = b.handle().unwrap_err();
        assert!(matches!(err, ProxyError::Toolkit(ToolkitError::InvalidArguments { .. })));
        assert_eq!(b.state(), ProxyState::Unconstructed);
    }

    // ── children ──────────────────────────────────────────────────────────

    #[test]
    fn box_children_are_appended_with_stretchy_flag() {
        let (tk, app) = app();
        let mut column = ControlProxy::new(&app, "vertical_box", vec![]);
        column.add_child(button(&app, "a")).unwrap();
        column.add_child(button(&app, "b").stretchy(false)).unwrap();

        let appends: Vec<Vec<Arg>> = tk
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Append { args, .. } => Some(args),
                _ => None,
            })
            .collect();
        assert_eq!(appends, vec![vec![Arg::Int(1)], vec![Arg::Int(0)]]);
        assert_eq!(column.children().len(), 2);
    }

    #[test]
    fn leaves_reject_children() {
        let (_tk, app) = app();
        let mut b = button(&app, "a");
        let err = b.add_child(button(&app, "b")).unwrap_err();
        assert_eq!(err, ProxyError::NotAContainer { kind: "button".to_string() });
    }

    #[test]
    fn single_slot_containers_take_one_child() {
        let (_tk, app) = app();
        let mut group = ControlProxy::new(&app, "group", vec!["g".into()]);
        group.add_child(button(&app, "a")).unwrap();
        let err = group.add_child(button(&app, "b")).unwrap_err();
        assert_eq!(err, ProxyError::ChildLimit { kind: "group".to_string() });
    }

    // ── destruction ───────────────────────────────────────────────────────

    #[test]
    fn children_are_destroyed_before_parent() {
        let (tk, app) = app();
        let mut column = ControlProxy::new(&app, "vertical_box", vec![]);
        let a = column.add_child(button(&app, "a")).unwrap().handle().unwrap();
        let b = column.add_child(button(&app, "b")).unwrap().handle().unwrap();
        let parent = column.handle().unwrap();
        tk.clear_calls();

        column.destroy().unwrap();
        assert_eq!(
            tk.calls(),
            vec![
                Call::Delete { container: "vertical_box".into(), parent, index: 0 },
                Call::Destroy(a),
                Call::Delete { container: "vertical_box".into(), parent, index: 0 },
                Call::Destroy(b),
                Call::Destroy(parent),
            ]
        );
        assert!(column.children().is_empty());
    }

    #[test]
    fn nested_children_are_destroyed_depth_first() {
        let (tk, app) = app();
        let mut outer = ControlProxy::new(&app, "vertical_box", vec![]);
        let inner = outer.add_child(ControlProxy::new(&app, "group", vec!["g".into()])).unwrap();
        let leaf = inner.add_child(button(&app, "x")).unwrap().handle().unwrap();
        let inner_handle = outer.child_mut(0).unwrap().handle().unwrap();
        let outer_handle = outer.handle().unwrap();
        tk.clear_calls();

        outer.destroy().unwrap();
        let destroys: Vec<NativeHandle> = tk
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Destroy(h) => Some(h),
                _ => None,
            })
            .collect();
        assert_eq!(destroys, vec![leaf, inner_handle, outer_handle]);
    }

    #[test]
    fn use_after_destroy_fails_fast() {
        let (_tk, app) = app();
        let mut b = button(&app, "a");
        b.handle().unwrap();
        b.destroy().unwrap();

        let destroyed = ProxyError::Destroyed { kind: "button".to_string() };
        assert_eq!(b.handle().unwrap_err(), destroyed);
        assert_eq!(b.show().unwrap_err(), destroyed);
        assert_eq!(b.destroy().unwrap_err(), destroyed);
        assert_eq!(b.handle_listener("on_clicked", || None).unwrap_err(), destroyed);
    }

    #[test]
    fn attached_child_is_destroyed_through_its_parent() {
        let (tk, app) = app();
        let mut column = ControlProxy::new(&app, "vertical_box", vec![]);
        let b = column.add_child(button(&app, "a")).unwrap().handle().unwrap();
        let parent = column.handle().unwrap();
        tk.clear_calls();

        let err = column.child_mut(0).unwrap().destroy().unwrap_err();
        assert_eq!(err, ProxyError::Attached { kind: "button".to_string() });
        assert!(tk.calls().is_empty());
        assert!(tk.is_live(b));

        column.destroy().unwrap();
        assert_eq!(
            tk.calls(),
            vec![
                Call::Delete { container: "vertical_box".into(), parent, index: 0 },
                Call::Destroy(b),
                Call::Destroy(parent),
            ]
        );
        assert!(column.is_destroyed());
        assert!(!tk.is_live(parent));
    }

    #[test]
    fn detached_child_can_be_destroyed_directly() {
        let (tk, app) = app();
        let mut column = ControlProxy::new(&app, "vertical_box", vec![]);
        column.add_child(button(&app, "a")).unwrap();
        let parent = column.handle().unwrap();
        column.destroy_child(0).unwrap();
        tk.clear_calls();

        column.destroy().unwrap();
        assert_eq!(tk.calls(), vec![Call::Destroy(parent)]);
    }

    #[test]
    fn destroying_unconstructed_proxy_makes_no_native_call() {
        let (tk, app) = app();
        let mut b = button(&app, "a");
        b.destroy().unwrap();
        assert!(b.is_destroyed());
        assert!(tk.calls().is_empty());
    }

    // ── listeners ─────────────────────────────────────────────────────────

    #[test]
    fn listener_fires_through_the_toolkit() {
        let (tk, app) = app();
        let clicks = Rc::new(Cell::new(0));
        let c = clicks.clone();
        let mut b = button(&app, "a");
        b.handle_listener("on_clicked", move || {
            c.set(c.get() + 1);
            None
        })
        .unwrap();
        let h = b.handle().unwrap();

        assert_eq!(tk.fire(h, "on_clicked"), Some(0));
        assert_eq!(tk.fire(h, "on_clicked"), Some(0));
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn replacing_a_listener_keeps_only_the_new_one() {
        let (tk, app) = app();
        let hits = Rc::new(Cell::new((0, 0)));
        let (h1, h2) = (hits.clone(), hits.clone());
        let mut b = button(&app, "a");
        b.handle_listener("on_clicked", move || {
            h1.set((h1.get().0 + 1, h1.get().1));
            None
        })
        .unwrap();
        b.handle_listener("on_clicked", move || {
            h2.set((h2.get().0, h2.get().1 + 1));
            None
        })
        .unwrap();

        tk.fire(b.handle().unwrap(), "on_clicked");
        assert_eq!(hits.get(), (0, 1));
        assert_eq!(app.pending_callbacks().0, 0);
    }

    #[test]
    fn unknown_event_is_rejected() {
        let (_tk, app) = app();
        let mut label = ControlProxy::new(&app, "label", vec!["x".into()]);
        let err = label.handle_listener("on_clicked", || None).unwrap_err();
        assert!(matches!(err, ProxyError::Toolkit(ToolkitError::UnsupportedEvent { .. })));
    }

    #[test]
    fn dropping_a_live_proxy_keeps_its_callbacks() {
        let (tk, app) = app();
        let clicks = Rc::new(Cell::new(0));
        let c = clicks.clone();
        let mut b = button(&app, "a");
        b.handle_listener("on_clicked", move || {
            c.set(c.get() + 1);
            None
        })
        .unwrap();
        let h = b.handle().unwrap();
        drop(b);

        assert_eq!(tk.fire(h, "on_clicked"), Some(0));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn destroy_disconnects_listeners() {
        let (tk, app) = app();
        let mut b = button(&app, "a");
        b.handle_listener("on_clicked", || None).unwrap();
        let h = b.handle().unwrap();
        b.destroy().unwrap();
        assert!(!tk.has_listener(h, "on_clicked"));
        assert!(!b.has_listener("on_clicked"));
    }
}
