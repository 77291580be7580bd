//! Logging facade.
//!
//! With the `tracing` feature enabled this re-exports the `tracing` macros the
//! solver uses. Without it, the same names resolve to no-op macros so call
//! sites never need their own `#[cfg]` guards.
//!
//! `warn` is exported as `warn_event`: a local `macro_rules! warn` brought in
//! with `use` is ambiguous with the built-in `#[warn]` lint attribute.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, debug_span, trace, warn as warn_event};

#[cfg(not(feature = "tracing"))]
pub(crate) use noop::{debug, debug_span, trace, warn_event};

#[cfg(not(feature = "tracing"))]
mod noop {
    /// Stand-in for `tracing::Span` when tracing is compiled out.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct NoopSpan;

    impl NoopSpan {
        #[inline]
        pub(crate) fn entered(self) -> Self {
            self
        }
    }

    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    macro_rules! warn_event {
        ($($arg:tt)*) => {};
    }

    pub(crate) use {debug, debug_span, trace, warn_event};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use noop::NoopSpan;
