//! Binary layout of the legacy 64-bit integer storage record.
//!
//! The consumer reads this struct directly, so field order and types must
//! match its C declaration exactly.

use std::ffi::{c_char, c_int, c_void};

/// The legacy storage record for 64-bit integer data.
#[repr(C)]
#[derive(Debug)]
pub struct RawStorage {
    /// First element of the storage.
    pub data: *mut i64,
    /// Number of elements reachable through `data`.
    pub size: isize,
    /// Reference count. Zero: the consumer must not retain or release
    /// through this handle.
    pub refcount: c_int,
    /// Storage flags. Zero: neither resizable nor freeable.
    pub flag: c_char,
    /// Allocator vtable. Null: this storage is not allocator-managed.
    pub allocator: *mut c_void,
    /// Context handed back to the allocator. Null when `allocator` is null.
    pub allocator_context: *mut c_void,
}

impl RawStorage {
    /// A record that points at `data` without participating in the legacy
    /// refcounting or allocator lifecycle.
    pub fn unmanaged(data: *mut i64, size: isize) -> Self {
        Self {
            data,
            size,
            refcount: 0,
            flag: 0,
            allocator: std::ptr::null_mut(),
            allocator_context: std::ptr::null_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, offset_of, size_of};

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn raw_storage_matches_legacy_layout() {
        assert_eq!(size_of::<RawStorage>(), 40);
        assert_eq!(align_of::<RawStorage>(), 8);
        assert_eq!(offset_of!(RawStorage, data), 0);
        assert_eq!(offset_of!(RawStorage, size), 8);
        assert_eq!(offset_of!(RawStorage, refcount), 16);
        assert_eq!(offset_of!(RawStorage, flag), 20);
        assert_eq!(offset_of!(RawStorage, allocator), 24);
        assert_eq!(offset_of!(RawStorage, allocator_context), 32);
    }

    #[test]
    fn unmanaged_bookkeeping_is_neutral() {
        let mut dims = [4i64, 8];
        let raw = RawStorage::unmanaged(dims.as_mut_ptr(), dims.len() as isize);
        assert_eq!(raw.data, dims.as_mut_ptr());
        assert_eq!(raw.size, 2);
        assert_eq!(raw.refcount, 0);
        assert_eq!(raw.flag, 0);
        assert!(raw.allocator.is_null());
        assert!(raw.allocator_context.is_null());
    }
}
