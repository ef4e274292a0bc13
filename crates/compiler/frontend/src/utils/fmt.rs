use core::fmt;

/// Adapts a closure into a [`fmt::Display`] implementation.
#[derive(Debug, Clone)]
pub struct DisplayFn<F>(F);

impl<F> DisplayFn<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> fmt::Display for DisplayFn<F>
where
    F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0(f)
    }
}

/// Renders a caret underline of `len` characters starting at column `pad`.
pub fn underline(pad: usize, len: usize) -> impl fmt::Display + Clone {
    DisplayFn::new(move |f: &mut fmt::Formatter<'_>| write!(f, "{:>pad$}{:^>len$}", "", ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underline_is_padded() {
        assert_eq!(underline(2, 3).to_string(), "  ^^^");
        assert_eq!(underline(0, 1).to_string(), "^");
    }
}
