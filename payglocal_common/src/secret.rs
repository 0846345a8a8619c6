use std::{
    fmt,
    fmt::{Debug, Display},
};

use zeroize::Zeroize;

/// Holds sensitive material (PEM text, API keys) so that it never shows up in logs or debug output.
/// The value is wiped from memory when the wrapper is dropped.
#[derive(Clone, Default)]
pub struct Secret<T>
where T: Clone + Default + Zeroize
{
    value: T,
}

impl<T: Clone + Default + Zeroize> Secret<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn reveal(&self) -> &T {
        &self.value
    }
}

impl Secret<String> {
    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl From<String> for Secret<String> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T: Clone + Default + Zeroize> Drop for Secret<T> {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

impl<T: Clone + Default + Zeroize> Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl<T: Clone + Default + Zeroize> Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}
