use std::cell::UnsafeCell;
use std::ptr;

use crate::RawStorage;

/// What a view exposes when the wrapped sequence has no elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyPolicy {
    /// A present handle with size 0.
    #[default]
    Preserve,
    /// A single-element sequence containing `1`, so zero-dimensional shapes
    /// allocate as one-dimensional in the legacy library.
    NormalizeToOne,
    /// A null handle. The legacy API treats "no storage" and "storage with
    /// zero elements" as distinct signals.
    CollapseToNull,
}

/// Presents a borrowed dims slice as legacy storage, without copying it.
///
/// A view is built on the stack right before a legacy call and dropped right
/// after. It never owns the slice, and every handle it produces carries
/// neutral bookkeeping fields, so the consumer performs no cleanup through
/// this path.
pub struct StorageView<'a> {
    source: &'a [i64],
    policy: EmptyPolicy,
    /// Backing cell for [`EmptyPolicy::NormalizeToOne`].
    one: i64,
    /// Record handed to the legacy API. Written on conversion, not at
    /// construction, so the view stays movable until first use.
    raw: UnsafeCell<RawStorage>,
}

impl<'a> StorageView<'a> {
    pub fn new(source: &'a [i64], policy: EmptyPolicy) -> Self {
        Self {
            source,
            policy,
            one: 1,
            raw: UnsafeCell::new(RawStorage::unmanaged(ptr::null_mut(), 0)),
        }
    }

    /// Boolean-flag factory matching the legacy call sites. `zero_dim_to_one`
    /// selects [`EmptyPolicy::NormalizeToOne`], `empty_to_null` selects
    /// [`EmptyPolicy::CollapseToNull`]. Setting both is a contract violation.
    pub fn make(source: &'a [i64], zero_dim_to_one: bool, empty_to_null: bool) -> Self {
        assert!(
            !(zero_dim_to_one && empty_to_null),
            "zero_dim_to_one and empty_to_null are mutually exclusive"
        );
        let policy = if zero_dim_to_one {
            EmptyPolicy::NormalizeToOne
        } else if empty_to_null {
            EmptyPolicy::CollapseToNull
        } else {
            EmptyPolicy::Preserve
        };
        Self::new(source, policy)
    }

    /// View a size sequence. Zero-dimensional shapes surface as `[1]`.
    pub fn sizes(dims: &'a [i64]) -> Self {
        Self::new(dims, EmptyPolicy::NormalizeToOne)
    }

    /// View a stride sequence. Missing strides surface as a null handle.
    pub fn strides(dims: &'a [i64]) -> Self {
        Self::new(dims, EmptyPolicy::CollapseToNull)
    }

    pub fn policy(&self) -> EmptyPolicy {
        self.policy
    }

    /// The dims a produced handle exposes, after the empty policy is applied.
    pub fn resolved(&self) -> &[i64] {
        if self.source.is_empty() && self.policy == EmptyPolicy::NormalizeToOne {
            std::slice::from_ref(&self.one)
        } else {
            self.source
        }
    }

    /// Pointer to pass to the legacy API, or null when an empty sequence
    /// collapses to an absent handle.
    ///
    /// The record behind the pointer lives inside `self`: it is valid only
    /// while the view is, and must not be retained past its scope. Repeated
    /// calls rewrite the same field values, so conversion is idempotent.
    pub fn as_ptr(&self) -> *mut RawStorage {
        let dims = self.resolved();
        if dims.is_empty() && self.policy == EmptyPolicy::CollapseToNull {
            log::trace!("empty dims collapse to an absent storage handle");
            return ptr::null_mut();
        }
        let raw = self.raw.get();
        unsafe {
            raw.write(RawStorage::unmanaged(
                dims.as_ptr() as *mut i64,
                dims.len() as isize,
            ));
        }
        raw
    }
}

impl std::fmt::Debug for StorageView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageView")
            .field("dims", &self.resolved())
            .field("policy", &self.policy)
            .finish()
    }
}
