//! Stable-address views over slice storage.
//!
//! A view borrows its slice for the whole lifetime `'a`, so the backing
//! buffer can neither move nor be freed while raw-address traversal is in
//! progress. The view is released when it goes out of scope. Length is
//! captured once at acquisition; element access through the view does no
//! further bounds checking.

use std::marker::PhantomData;
use std::ptr::NonNull;

/// Read-only stable view
#[derive(Debug, Clone, Copy)]
pub struct Pinned<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    _borrow: PhantomData<&'a [T]>,
}

impl<'a, T: Copy> Pinned<'a, T> {
    /// Acquire a view over `slice` for the duration of the borrow
    pub fn acquire(slice: &'a [T]) -> Self {
        Self {
            ptr: NonNull::from(slice).cast(),
            len: slice.len(),
            _borrow: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest multiple of `width` not exceeding the length
    pub fn block_end(&self, width: usize) -> usize {
        self.len - self.len % width
    }

    /// Read element `index` without a bounds check.
    ///
    /// # Safety
    /// `index` must be less than [`len`](Self::len).
    #[inline(always)]
    pub unsafe fn read(&self, index: usize) -> T {
        debug_assert!(index < self.len);
        *self.ptr.as_ptr().add(index)
    }

    /// Base address of the viewed storage
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }
}

/// Mutable stable view
#[derive(Debug)]
pub struct PinnedMut<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    _borrow: PhantomData<&'a mut [T]>,
}

impl<'a, T: Copy> PinnedMut<'a, T> {
    /// Acquire an exclusive view over `slice` for the duration of the borrow
    pub fn acquire(slice: &'a mut [T]) -> Self {
        let len = slice.len();
        Self {
            ptr: NonNull::from(slice).cast(),
            len,
            _borrow: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// # Safety
    /// `index` must be less than [`len`](Self::len).
    #[inline(always)]
    pub unsafe fn read(&self, index: usize) -> T {
        debug_assert!(index < self.len);
        *self.ptr.as_ptr().add(index)
    }

    /// # Safety
    /// `index` must be less than [`len`](Self::len).
    #[inline(always)]
    pub unsafe fn write(&mut self, index: usize, value: T) {
        debug_assert!(index < self.len);
        *self.ptr.as_ptr().add(index) = value;
    }

    /// Base address and one-past-the-end address of the viewed storage
    pub fn as_mut_ptr_range(&mut self) -> (*mut T, *mut T) {
        let start = self.ptr.as_ptr();
        // SAFETY: one past the end of the same allocation
        let end = unsafe { start.add(self.len) };
        (start, end)
    }
}
