use std::ffi::c_void;
use std::fmt;

/// Opaque reference to a toolkit-allocated UI object.
///
/// Invariant:
/// - exactly one control proxy owns a given handle;
/// - the handle must not be passed back to the toolkit after its owner
///   destroyed it.
///
/// The value is the native pointer address for libui, or a sequential id for
/// in-memory toolkits. It is never dereferenced on the Rust side.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct NativeHandle(usize);

impl NativeHandle {
    #[inline]
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Wraps a pointer returned by a native constructor. Null is rejected.
    #[inline]
    pub fn from_ptr(ptr: *mut c_void) -> Option<Self> {
        if ptr.is_null() { None } else { Some(Self(ptr as usize)) }
    }

    #[inline]
    pub const fn raw(self) -> usize {
        self.0
    }

    #[inline]
    pub fn as_ptr(self) -> *mut c_void {
        self.0 as *mut c_void
    }
}

impl fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeHandle({:#x})", self.0)
    }
}
