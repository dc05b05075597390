//! libui-backed [`Toolkit`].

mod ffi;

use std::ffi::{c_int, CStr, CString};
use std::marker::PhantomData;
use std::ptr;

use anyhow::{Context, Result};

use crate::arg::Arg;
use crate::callback::{CallbackClosure, NativeType};
use crate::catalog;
use crate::error::ToolkitError;
use crate::handle::NativeHandle;
use crate::toolkit::Toolkit;

/// The libui library, initialized for the current thread.
///
/// Not `Send`: libui must only be driven from the thread that initialized it.
pub struct NativeToolkit {
    _not_send: PhantomData<*const ()>,
}

impl NativeToolkit {
    /// Calls `uiInit`. libui supports one initialization per process.
    pub fn init() -> Result<Self> {
        let mut options = ffi::InitOptions { size: std::mem::size_of::<ffi::InitOptions>() };
        let err = unsafe { ffi::uiInit(&mut options) };
        if !err.is_null() {
            let message = unsafe { CStr::from_ptr(err) }.to_string_lossy().into_owned();
            unsafe { ffi::uiFreeInitError(err) };
            return Err(ToolkitError::Init(message)).context("uiInit failed");
        }
        log::debug!("libui initialized");
        Ok(Self { _not_send: PhantomData })
    }
}

impl Drop for NativeToolkit {
    fn drop(&mut self) {
        unsafe { ffi::uiUninit() };
        log::debug!("libui uninitialized");
    }
}

fn c_string(control: &str, value: &str) -> Result<CString, ToolkitError> {
    CString::new(value).map_err(|_| ToolkitError::InvalidArguments {
        control: control.to_string(),
        reason: "string argument contains a NUL byte".to_string(),
    })
}

fn c_int_arg(control: &str, value: i64) -> Result<c_int, ToolkitError> {
    c_int::try_from(value).map_err(|_| ToolkitError::InvalidArguments {
        control: control.to_string(),
        reason: format!("{value} does not fit a C int"),
    })
}

fn str_arg<'a>(args: &'a [Arg], index: usize) -> &'a str {
    args.get(index).and_then(Arg::as_str).unwrap_or_default()
}

fn int_arg(args: &[Arg], index: usize) -> i64 {
    args.get(index).and_then(Arg::as_int).unwrap_or_default()
}

impl Toolkit for NativeToolkit {
    fn new_control(&self, kind: &str, args: &[Arg]) -> Result<NativeHandle, ToolkitError> {
        catalog::validate_args(kind, args)?;
        let ptr = match kind {
            "window" => {
                let title = c_string(kind, str_arg(args, 0))?;
                let width = c_int_arg(kind, int_arg(args, 1))?;
                let height = c_int_arg(kind, int_arg(args, 2))?;
                let menubar = c_int_arg(kind, int_arg(args, 3))?;
                unsafe { ffi::uiNewWindow(title.as_ptr(), width, height, menubar) }
            }
            "group" => {
                let title = c_string(kind, str_arg(args, 0))?;
                unsafe { ffi::uiNewGroup(title.as_ptr()) }
            }
            "vertical_box" => unsafe { ffi::uiNewVerticalBox() },
            "horizontal_box" => unsafe { ffi::uiNewHorizontalBox() },
            "button" => {
                let text = c_string(kind, str_arg(args, 0))?;
                unsafe { ffi::uiNewButton(text.as_ptr()) }
            }
            "label" => {
                let text = c_string(kind, str_arg(args, 0))?;
                unsafe { ffi::uiNewLabel(text.as_ptr()) }
            }
            "checkbox" => {
                let text = c_string(kind, str_arg(args, 0))?;
                unsafe { ffi::uiNewCheckbox(text.as_ptr()) }
            }
            "entry" => unsafe { ffi::uiNewEntry() },
            other => return Err(ToolkitError::UnsupportedControl(other.to_string())),
        };
        NativeHandle::from_ptr(ptr).ok_or_else(|| ToolkitError::NullHandle(kind.to_string()))
    }

    fn show_control(&self, handle: NativeHandle) {
        unsafe { ffi::uiControlShow(handle.as_ptr()) };
    }

    fn destroy_control(&self, handle: NativeHandle) {
        unsafe { ffi::uiControlDestroy(handle.as_ptr()) };
    }

    fn set_child(
        &self,
        container: &str,
        parent: NativeHandle,
        child: Option<NativeHandle>,
    ) -> Result<(), ToolkitError> {
        let child = child.map_or(ptr::null_mut(), NativeHandle::as_ptr);
        match container {
            "window" => unsafe { ffi::uiWindowSetChild(parent.as_ptr(), child) },
            "group" => unsafe { ffi::uiGroupSetChild(parent.as_ptr(), child) },
            other => return Err(ToolkitError::UnsupportedContainer(other.to_string())),
        }
        Ok(())
    }

    fn append_child(
        &self,
        container: &str,
        parent: NativeHandle,
        child: NativeHandle,
        args: &[Arg],
    ) -> Result<(), ToolkitError> {
        match container {
            "vertical_box" | "horizontal_box" => {
                let stretchy = c_int_arg(container, int_arg(args, 0))?;
                unsafe { ffi::uiBoxAppend(parent.as_ptr(), child.as_ptr(), stretchy) };
                Ok(())
            }
            other => Err(ToolkitError::UnsupportedContainer(other.to_string())),
        }
    }

    fn delete_child(&self, container: &str, parent: NativeHandle, index: usize) -> Result<(), ToolkitError> {
        match container {
            "vertical_box" | "horizontal_box" => {
                let index = c_int_arg(container, index as i64)?;
                unsafe { ffi::uiBoxDelete(parent.as_ptr(), index) };
                Ok(())
            }
            other => Err(ToolkitError::UnsupportedContainer(other.to_string())),
        }
    }

    fn connect(
        &self,
        control: &str,
        event: &str,
        handle: NativeHandle,
        closure: &CallbackClosure,
    ) -> Result<(), ToolkitError> {
        let expected = self.event_signature(control, event)?;
        debug_assert_eq!(closure.signature().ret(), expected.ret());
        let (h, data) = (handle.as_ptr(), closure.data());
        match (control, event) {
            ("window", "on_closing") => unsafe { ffi::uiWindowOnClosing(h, ffi::int_sender, data) },
            ("button", "on_clicked") => unsafe { ffi::uiButtonOnClicked(h, ffi::void_sender, data) },
            ("checkbox", "on_toggled") => unsafe { ffi::uiCheckboxOnToggled(h, ffi::void_sender, data) },
            ("entry", "on_changed") => unsafe { ffi::uiEntryOnChanged(h, ffi::void_sender, data) },
            _ => {
                return Err(ToolkitError::UnsupportedEvent {
                    control: control.to_string(),
                    event: event.to_string(),
                });
            }
        }
        Ok(())
    }

    fn queue_main(&self, closure: &CallbackClosure) {
        unsafe { ffi::uiQueueMain(ffi::void_data, closure.data()) };
    }

    fn timer(&self, milliseconds: f64, closure: &CallbackClosure) {
        debug_assert_eq!(closure.signature().ret(), NativeType::Int);
        let ms = milliseconds.round().clamp(0.0, f64::from(c_int::MAX)) as c_int;
        unsafe { ffi::uiTimer(ms, ffi::int_data, closure.data()) };
    }

    fn main(&self) {
        log::debug!("entering libui main loop");
        unsafe { ffi::uiMain() };
        log::debug!("libui main loop exited");
    }

    fn quit(&self) {
        unsafe { ffi::uiQuit() };
    }
}
