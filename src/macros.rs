//! Macros for declaring state enums.

/// Declare a state enum with its terminal and error states.
///
/// Besides the enum itself the expansion provides:
///
/// - [`State`](crate::core::State), with `is_final` and `is_error` answered
///   from the `final:` and `error:` lists;
/// - `Display`, printing the variant name;
/// - inherent constants `ALL`, `FINAL` and `ERROR` listing the variants in
///   declaration order.
///
/// # Example
///
/// ```
/// use cartflow::core::State;
/// use cartflow::state_enum;
///
/// state_enum! {
///     pub enum ShipmentState {
///         Packing,
///         InTransit,
///         Delivered,
///         Lost,
///     }
///     final: [Delivered, Lost]
///     error: [Lost]
/// }
///
/// assert_eq!(ShipmentState::InTransit.to_string(), "InTransit");
/// assert!(ShipmentState::Lost.is_error());
/// assert_eq!(ShipmentState::ALL.len(), 4);
/// assert_eq!(ShipmentState::FINAL, &[ShipmentState::Delivered, ShipmentState::Lost]);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        #[allow(dead_code)]
        impl $name {
            /// Every state, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];
            /// States after which the machine accepts no further requests.
            pub const FINAL: &'static [Self] = &[$($(Self::$final),*)?];
            /// States that record a failure.
            pub const ERROR: &'static [Self] = &[$($(Self::$error),*)?];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                Self::FINAL.contains(self)
            }

            fn is_error(&self) -> bool {
                Self::ERROR.contains(self)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
