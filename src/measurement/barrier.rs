//! Optimization barrier.
//!
//! [`do_not_optimize_away`] makes a value observably used, so the computation
//! that produced it can be neither removed as dead code nor folded into a
//! constant. Plain values that fit in a machine word are pushed through a
//! register. Values with drop glue or wider than a word are pinned in memory
//! instead: a register barrier would only observe part of them, not the
//! memory they own.
//!
//! Pointer-shaped values (`&T`, `*const T`) are word-sized and take the
//! register path. `black_box` treats its operand as escaping, so the pointee
//! is assumed read as well.

use std::mem::{self, ManuallyDrop};

/// Whether values of `T` go through the memory barrier.
///
/// `true` for types with drop glue and types wider than `usize`.
#[inline(always)]
pub const fn needs_indirect<T>() -> bool {
    mem::needs_drop::<T>() || mem::size_of::<T>() > mem::size_of::<usize>()
}

/// Force `value` to be treated as used by the optimizer.
///
/// # Example
///
/// ```
/// use tightloop::measurement::do_not_optimize_away;
///
/// let sum: u32 = (0..100).sum();
/// do_not_optimize_away(&sum);
/// ```
#[inline(always)]
pub fn do_not_optimize_away<T>(value: &T) {
    if needs_indirect::<T>() {
        memory_barrier(value);
    } else {
        register_barrier(value);
    }
}

#[inline(always)]
fn register_barrier<T>(value: &T) {
    // SAFETY: only reached for types without drop glue that fit in a word.
    // The bitwise copy lives inside ManuallyDrop and is consumed by the
    // barrier, so no second owner is ever observable.
    let copy = unsafe { ManuallyDrop::new(std::ptr::read(value)) };
    std::hint::black_box(copy);
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
#[inline(always)]
fn memory_barrier<T>(value: &T) {
    let ptr = value as *const T;
    // SAFETY: the template is a comment. Without `nomem` the compiler must
    // assume the block reads and writes memory reachable from `ptr`.
    unsafe {
        std::arch::asm!("/* {0} */", in(reg) ptr, options(nostack, preserves_flags));
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
fn memory_barrier<T>(value: &T) {
    std::hint::black_box(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_small_values_use_register() {
        assert!(!needs_indirect::<()>());
        assert!(!needs_indirect::<bool>());
        assert!(!needs_indirect::<u8>());
        assert!(!needs_indirect::<u16>());
        assert!(!needs_indirect::<[u8; 3]>());
    }

    #[test]
    fn test_dispatch_owning_and_wide_values_use_memory() {
        assert!(needs_indirect::<String>());
        assert!(needs_indirect::<Vec<u8>>());
        assert!(needs_indirect::<Box<u8>>());
        assert!(needs_indirect::<[u64; 4]>());
        assert!(needs_indirect::<(usize, usize)>());
    }

    #[test]
    fn test_dispatch_word_sized_values_use_register() {
        assert!(!needs_indirect::<u32>());
        assert!(!needs_indirect::<usize>());
        assert!(!needs_indirect::<isize>());
        assert!(!needs_indirect::<&u8>());
        assert!(!needs_indirect::<*const u32>());
        assert!(!needs_indirect::<Option<&u8>>());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_dispatch_64_bit_scalars_use_register() {
        assert!(!needs_indirect::<u64>());
        assert!(!needs_indirect::<i64>());
        assert!(!needs_indirect::<f64>());
        assert!(needs_indirect::<u128>());
    }

    #[test]
    fn test_barrier_accepts_any_value() {
        let mut buf = vec![0u8; 16];
        buf[3] = 7;
        do_not_optimize_away(&buf);
        do_not_optimize_away(&42u32);
        do_not_optimize_away(&String::from("kept"));
        do_not_optimize_away(&());
        assert_eq!(buf[3], 7);
    }
}
