//! Controls and events the toolkits know how to build and connect.
//!
//! The proxy layer is kind-agnostic; it asks the catalog how a control's
//! children are attached and which native signature an event uses.

use crate::arg::Arg;
use crate::callback::{NativeType, Signature};
use crate::error::ToolkitError;

/// Expected type of one positional constructor parameter.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ParamKind {
    Str,
    Int,
}

/// How a container attaches children to its native handle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ContainerKind {
    /// One child slot (`<container>_set_child`).
    Single,
    /// Ordered children (`<container>_append` / `<container>_delete`).
    Sequence,
}

#[derive(Debug)]
pub struct ControlSpec {
    pub kind: &'static str,
    pub params: &'static [ParamKind],
    pub container: Option<ContainerKind>,
}

pub static CONTROLS: &[ControlSpec] = &[
    ControlSpec {
        kind: "window",
        params: &[ParamKind::Str, ParamKind::Int, ParamKind::Int, ParamKind::Int],
        container: Some(ContainerKind::Single),
    },
    ControlSpec { kind: "group", params: &[ParamKind::Str], container: Some(ContainerKind::Single) },
    ControlSpec { kind: "vertical_box", params: &[], container: Some(ContainerKind::Sequence) },
    ControlSpec { kind: "horizontal_box", params: &[], container: Some(ContainerKind::Sequence) },
    ControlSpec { kind: "button", params: &[ParamKind::Str], container: None },
    ControlSpec { kind: "label", params: &[ParamKind::Str], container: None },
    ControlSpec { kind: "checkbox", params: &[ParamKind::Str], container: None },
    ControlSpec { kind: "entry", params: &[], container: None },
];

/// `(control, event, return type)`; every event callback receives the
/// sender handle and the closure's data pointer.
static EVENTS: &[(&str, &str, NativeType)] = &[
    ("window", "on_closing", NativeType::Int),
    ("button", "on_clicked", NativeType::Void),
    ("checkbox", "on_toggled", NativeType::Void),
    ("entry", "on_changed", NativeType::Void),
];

pub fn control_spec(kind: &str) -> Result<&'static ControlSpec, ToolkitError> {
    CONTROLS
        .iter()
        .find(|spec| spec.kind == kind)
        .ok_or_else(|| ToolkitError::UnsupportedControl(kind.to_string()))
}

pub fn container_kind(kind: &str) -> Result<Option<ContainerKind>, ToolkitError> {
    control_spec(kind).map(|spec| spec.container)
}

/// Native signature of `<control>_<event>` callbacks.
pub fn event_signature(control: &str, event: &str) -> Result<Signature, ToolkitError> {
    EVENTS
        .iter()
        .find(|(c, e, _)| *c == control && *e == event)
        .map(|(_, _, ret)| Signature::new(*ret, vec![NativeType::Pointer, NativeType::Pointer]))
        .ok_or_else(|| ToolkitError::UnsupportedEvent {
            control: control.to_string(),
            event: event.to_string(),
        })
}

/// Checks arity and parameter types of `args` against `kind`'s constructor.
pub fn validate_args(kind: &str, args: &[Arg]) -> Result<&'static ControlSpec, ToolkitError> {
    let spec = control_spec(kind)?;
    if args.len() != spec.params.len() {
        return Err(ToolkitError::InvalidArguments {
            control: kind.to_string(),
            reason: format!("expected {} arguments, got {}", spec.params.len(), args.len()),
        });
    }
    for (index, (arg, param)) in args.iter().zip(spec.params).enumerate() {
        let ok = match param {
            ParamKind::Str => arg.as_str().is_some(),
            ParamKind::Int => arg.as_int().is_some(),
        };
        if !ok {
            return Err(ToolkitError::InvalidArguments {
                control: kind.to_string(),
                reason: format!("argument {index} must be {param:?}, got {} {arg}", arg.type_name()),
            });
        }
    }
    Ok(spec)
}
