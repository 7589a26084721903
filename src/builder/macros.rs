//! Macros for declaring identifier enums.

/// Declare a fieldless enum usable as a region, state or event identifier.
///
/// Derives `Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize`
/// and implements [`Id`](crate::core::Id) with the declaration order as the
/// index and the variant name as the name.
///
/// # Example
///
/// ```
/// use tickstate::core::Id;
/// use tickstate::id_enum;
///
/// id_enum! {
///     pub enum MainState {
///         Stopped,
///         Running,
///         Paused,
///     }
/// }
///
/// assert_eq!(MainState::Paused.index(), 2);
/// assert_eq!(MainState::Running.name(), "Running");
/// ```
#[macro_export]
macro_rules! id_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Id for $name {
            fn index(self) -> usize {
                self as usize
            }

            fn name(&self) -> ::std::borrow::Cow<'static, str> {
                match self {
                    $(Self::$variant => ::std::borrow::Cow::Borrowed(stringify!($variant))),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Id;

    id_enum! {
        enum Evt {
            Start,
            TimerFlash,
            TimerInterval,
            TimerStop,
        }
    }

    #[test]
    fn id_enum_macro_generates_trait() {
        assert_eq!(Evt::Start.index(), 0);
        assert_eq!(Evt::TimerStop.index(), 3);
        assert_eq!(Evt::TimerFlash.name(), "TimerFlash");
    }

    #[test]
    fn id_enum_supports_visibility() {
        id_enum! {
            pub enum Region {
                Main,
            }
        }

        assert_eq!(Region::Main.index(), 0);
    }

    #[test]
    fn id_enum_roundtrips_through_serde() {
        let json = serde_json::to_string(&Evt::TimerInterval).unwrap();
        let back: Evt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Evt::TimerInterval);
    }
}
