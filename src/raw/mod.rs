/// Asserts an internal consistency condition when the `invariant-checks` feature is on.
///
/// Precondition checks on caller input use `assert!` directly and are never compiled out.
macro_rules! invariant {
    ($($arg:tt)*) => {
        if cfg!(feature = "invariant-checks") {
            assert!($($arg)*);
        }
    };
}

mod arena;
mod handle;
mod node;
mod raw_interval_set;

pub(crate) use handle::Handle;
pub(crate) use node::Node;
pub(crate) use raw_interval_set::RawIntervalSet;
