use core::mem;

/// A string slice that is statically guaranteed to hold at least one char.
/// Used to walk a bundle of short flags, like the `abc` in `-abc`.
#[derive(Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct PopulatedStr(str);

impl PopulatedStr {
    /// SAFETY: the string must not be empty
    #[inline(always)]
    unsafe fn new_unchecked(s: &str) -> &Self {
        debug_assert!(!s.is_empty());

        // Safety: `PopulatedStr` is a transparent wrapper around `str`
        unsafe { mem::transmute(s) }
    }

    #[inline]
    pub fn new(s: &str) -> Option<&Self> {
        match s.is_empty() {
            true => None,
            // Safety: we just confirmed that the string is non-empty
            false => Some(unsafe { Self::new_unchecked(s) }),
        }
    }

    /// Split off the first char. The remainder may be empty.
    #[inline]
    pub fn split_first(&self) -> (char, &str) {
        let mut chars = self.0.chars();

        // Safety: `self.0` is guaranteed to be non-empty, so it has a first
        // char
        let first = unsafe { chars.next().unwrap_unchecked() };
        (first, chars.as_str())
    }

    #[inline(always)]
    pub fn get(&self) -> &str {
        &self.0
    }
}
