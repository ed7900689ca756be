use std::fmt::{self, Display};

/// A value that may or may not carry an error worth reporting.
///
/// `None` and `Ok(_)` are absent; `Some(e)` and `Err(e)` are present. Plain
/// messages and `dyn Error` values are always present.
///
/// Concrete error types such as `std::io::Error` do not implement this trait.
/// Wrap them as `Some(&err)` (or pass a `Result` as is), or coerce to
/// `&dyn Error`:
///
/// ```
/// use pingora_resp::Reportable;
///
/// let err = std::io::Error::other("disk full");
/// assert!(Some(&err).is_present());
/// let err: &dyn std::error::Error = &err;
/// assert_eq!(err.render().as_deref(), Some("disk full"));
/// ```
pub trait Reportable {
    fn is_present(&self) -> bool;

    /// The rendered value, or `None` when absent.
    fn render(&self) -> Option<String>;
}

impl<E: Display> Reportable for Option<E> {
    fn is_present(&self) -> bool {
        self.is_some()
    }

    fn render(&self) -> Option<String> {
        self.as_ref().map(ToString::to_string)
    }
}

impl<T, E: Display> Reportable for Result<T, E> {
    fn is_present(&self) -> bool {
        self.is_err()
    }

    fn render(&self) -> Option<String> {
        self.as_ref().err().map(ToString::to_string)
    }
}

impl Reportable for str {
    fn is_present(&self) -> bool {
        true
    }

    fn render(&self) -> Option<String> {
        Some(self.to_owned())
    }
}

impl Reportable for String {
    fn is_present(&self) -> bool {
        true
    }

    fn render(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl Reportable for fmt::Arguments<'_> {
    fn is_present(&self) -> bool {
        true
    }

    fn render(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl Reportable for dyn std::error::Error + '_ {
    fn is_present(&self) -> bool {
        true
    }

    fn render(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl Reportable for dyn std::error::Error + Send + Sync + '_ {
    fn is_present(&self) -> bool {
        true
    }

    fn render(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl<R: Reportable + ?Sized> Reportable for &R {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }

    fn render(&self) -> Option<String> {
        (**self).render()
    }
}

impl<R: Reportable + ?Sized> Reportable for Box<R> {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }

    fn render(&self) -> Option<String> {
        (**self).render()
    }
}
