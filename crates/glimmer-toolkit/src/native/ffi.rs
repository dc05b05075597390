//! Raw libui bindings and the trampolines that route native callbacks into
//! [`CallbackClosure`](crate::callback::CallbackClosure) storage.

use std::ffi::{c_char, c_int, c_void};

use crate::callback::CallbackClosure;

#[repr(C)]
pub struct InitOptions {
    pub size: usize,
}

pub type VoidDataFn = unsafe extern "C" fn(data: *mut c_void);
pub type IntDataFn = unsafe extern "C" fn(data: *mut c_void) -> c_int;
pub type VoidSenderFn = unsafe extern "C" fn(sender: *mut c_void, data: *mut c_void);
pub type IntSenderFn = unsafe extern "C" fn(sender: *mut c_void, data: *mut c_void) -> c_int;

#[link(name = "ui")]
unsafe extern "C" {
    pub fn uiInit(options: *mut InitOptions) -> *const c_char;
    pub fn uiUninit();
    pub fn uiFreeInitError(err: *const c_char);

    pub fn uiMain();
    pub fn uiQuit();
    pub fn uiQueueMain(f: VoidDataFn, data: *mut c_void);
    pub fn uiTimer(milliseconds: c_int, f: IntDataFn, data: *mut c_void);

    pub fn uiControlShow(control: *mut c_void);
    pub fn uiControlDestroy(control: *mut c_void);

    pub fn uiNewWindow(title: *const c_char, width: c_int, height: c_int, has_menubar: c_int) -> *mut c_void;
    pub fn uiWindowSetChild(window: *mut c_void, child: *mut c_void);
    pub fn uiWindowOnClosing(window: *mut c_void, f: IntSenderFn, data: *mut c_void);

    pub fn uiNewGroup(title: *const c_char) -> *mut c_void;
    pub fn uiGroupSetChild(group: *mut c_void, child: *mut c_void);

    pub fn uiNewVerticalBox() -> *mut c_void;
    pub fn uiNewHorizontalBox() -> *mut c_void;
    pub fn uiBoxAppend(b: *mut c_void, child: *mut c_void, stretchy: c_int);
    pub fn uiBoxDelete(b: *mut c_void, index: c_int);

    pub fn uiNewButton(text: *const c_char) -> *mut c_void;
    pub fn uiButtonOnClicked(button: *mut c_void, f: VoidSenderFn, data: *mut c_void);

    pub fn uiNewLabel(text: *const c_char) -> *mut c_void;

    pub fn uiNewCheckbox(text: *const c_char) -> *mut c_void;
    pub fn uiCheckboxOnToggled(checkbox: *mut c_void, f: VoidSenderFn, data: *mut c_void);

    pub fn uiNewEntry() -> *mut c_void;
    pub fn uiEntryOnChanged(entry: *mut c_void, f: VoidSenderFn, data: *mut c_void);
}

pub unsafe extern "C" fn void_data(data: *mut c_void) {
    log::trace!("queue_main callback {data:p}");
    unsafe { CallbackClosure::invoke_data(data) };
}

pub unsafe extern "C" fn int_data(data: *mut c_void) -> c_int {
    log::trace!("timer callback {data:p}");
    unsafe { CallbackClosure::invoke_data(data) }
}

pub unsafe extern "C" fn void_sender(sender: *mut c_void, data: *mut c_void) {
    log::trace!("event from {sender:p} -> {data:p}");
    unsafe { CallbackClosure::invoke_data(data) };
}

pub unsafe extern "C" fn int_sender(sender: *mut c_void, data: *mut c_void) -> c_int {
    log::trace!("event from {sender:p} -> {data:p}");
    unsafe { CallbackClosure::invoke_data(data) }
}
