//! Identifier trait shared by regions, states and events.
//!
//! Every table in the runtime is keyed by a small dense integer. The `Id`
//! trait maps an application's enum (or a plain integer) onto that slot
//! index and gives it a printable name for diagnostics.

use std::borrow::Cow;
use std::fmt::Debug;

/// Trait for region, state and event identifiers.
///
/// Identifiers are small `Copy` values. `index` must be stable and dense
/// enough to be used as a table slot; two distinct identifiers of the same
/// type must never share an index.
///
/// # Example
///
/// ```rust
/// use tickstate::core::Id;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// enum Region {
///     Main,
///     Backlight,
/// }
///
/// impl Id for Region {
///     fn index(self) -> usize {
///         self as usize
///     }
/// }
///
/// assert_eq!(Region::Backlight.index(), 1);
/// assert_eq!(Region::Main.name(), "Main");
/// ```
pub trait Id: Copy + Eq + Debug {
    /// Table slot for this identifier.
    fn index(self) -> usize;

    /// Name used in log output.
    ///
    /// Default implementation uses the `Debug` representation.
    fn name(&self) -> Cow<'static, str> {
        Cow::Owned(format!("{self:?}"))
    }
}

macro_rules! impl_id_for_int {
    ($($ty:ty),*) => {
        $(
            impl Id for $ty {
                fn index(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_id_for_int!(u8, u16, u32, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum TestEvent {
        Start,
        Flash,
        Stop,
    }

    impl Id for TestEvent {
        fn index(self) -> usize {
            self as usize
        }
    }

    #[test]
    fn enum_index_follows_declaration_order() {
        assert_eq!(TestEvent::Start.index(), 0);
        assert_eq!(TestEvent::Flash.index(), 1);
        assert_eq!(TestEvent::Stop.index(), 2);
    }

    #[test]
    fn default_name_uses_debug() {
        assert_eq!(TestEvent::Flash.name(), "Flash");
    }

    #[test]
    fn integers_are_their_own_index() {
        assert_eq!(7u8.index(), 7);
        assert_eq!(300u16.index(), 300);
        assert_eq!(42usize.name(), "42");
    }
}
