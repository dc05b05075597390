//! Storage for managed callables handed to the toolkit.
//!
//! A [`CallbackClosure`] boxes a Rust closure at a stable heap address. The
//! toolkit receives that address as its `void *data` argument and calls back
//! through a trampoline matching the closure's [`Signature`].
//!
//! Invariant: the `CallbackClosure` must outlive every native registration of
//! its data pointer. Dropping it early leaves the toolkit holding a dangling
//! callback.

use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::fmt;

/// Value returned to timer/idle schedulers to keep a callback scheduled.
pub const CONTINUE: i32 = 1;

/// C type of a callback's return value or parameter.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NativeType {
    Void,
    Int,
    Pointer,
}

impl NativeType {
    /// Size in bytes on the native side.
    pub const fn size(self) -> usize {
        match self {
            NativeType::Void => 0,
            NativeType::Int => std::mem::size_of::<std::ffi::c_int>(),
            NativeType::Pointer => std::mem::size_of::<*mut c_void>(),
        }
    }
}

/// Native calling convention of a callback: return type plus ordered
/// parameter types.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Signature {
    ret: NativeType,
    args: Vec<NativeType>,
}

impl Signature {
    pub fn new(ret: NativeType, args: Vec<NativeType>) -> Self {
        Self { ret, args }
    }

    /// `int (*)(void *data)`: queue-main and timer callbacks.
    pub fn scheduled() -> Self {
        Self::new(NativeType::Int, vec![NativeType::Pointer])
    }

    pub fn ret(&self) -> NativeType {
        self.ret
    }

    pub fn args(&self) -> &[NativeType] {
        &self.args
    }

    /// Return size followed by argument sizes, in bytes.
    pub fn sizes(&self) -> (usize, Vec<usize>) {
        (self.ret.size(), self.args.iter().map(|a| a.size()).collect())
    }
}

struct ClosureCell {
    callable: RefCell<Box<dyn FnMut() -> i32>>,
    invocations: Cell<u64>,
}

/// A managed callable wrapped for invocation by the native toolkit.
pub struct CallbackClosure {
    signature: Signature,
    cell: Box<ClosureCell>,
}

impl CallbackClosure {
    pub fn new(signature: Signature, f: impl FnMut() -> i32 + 'static) -> Self {
        Self {
            signature,
            cell: Box::new(ClosureCell {
                callable: RefCell::new(Box::new(f)),
                invocations: Cell::new(0),
            }),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Number of times the toolkit (or a caller) invoked this closure.
    pub fn invocations(&self) -> u64 {
        self.cell.invocations.get()
    }

    pub fn invoke(&self) -> i32 {
        invoke_cell(&self.cell)
    }

    /// Stable pointer passed to the toolkit as the callback's user data.
    pub fn data(&self) -> *mut c_void {
        let cell: &ClosureCell = &self.cell;
        cell as *const ClosureCell as *mut c_void
    }

    /// Invokes the closure behind a pointer obtained from [`data`](Self::data).
    ///
    /// # Safety
    /// `data` must come from `CallbackClosure::data` of a closure that is still
    /// alive.
    pub unsafe fn invoke_data(data: *mut c_void) -> i32 {
        let cell = unsafe { &*(data as *const ClosureCell) };
        invoke_cell(cell)
    }
}

fn invoke_cell(cell: &ClosureCell) -> i32 {
    cell.invocations.set(cell.invocations.get() + 1);
    match cell.callable.try_borrow_mut() {
        Ok(mut f) => f(),
        Err(_) => {
            log::warn!("re-entrant callback invocation ignored");
            0
        }
    }
}

impl fmt::Debug for CallbackClosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackClosure")
            .field("signature", &self.signature)
            .field("data", &self.data())
            .field("invocations", &self.invocations())
            .finish()
    }
}
