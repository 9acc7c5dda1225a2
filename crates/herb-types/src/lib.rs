//! Foundation types for GreenHerbs traceability.
//!
//! Every other herb crate depends on `herb-types`. Records here are plain
//! data: they carry no storage or ledger behaviour of their own.
//!
//! # Key Types
//!
//! - [`Species`]: The fixed set of tracked herbs
//! - [`GeoPoint`]: A validated latitude/longitude pair
//! - [`Batch`]: A harvest batch and its ordered processing/test history
//! - [`BatchId`]: Species prefix plus creation second, e.g. `TUL-20250914-101500`
//! - [`ProcessingStep`] / [`ProcessingParams`]: Typed processing events
//! - [`TestResult`] / [`TestMeasurement`]: Typed laboratory measurements
//! - [`Clock`]: Source of "now" for ids and ledger timestamps

/// Declares a closed set of user-facing choices with a display label per
/// variant. Labels are what the operator sees and what serde writes; parsing
/// is case-insensitive.
///
/// `Name, "field" { .. }` rejects unknown input with
/// [`TypeError::InvalidChoice`] naming `field`; `Name, error = Path { .. }`
/// rejects it with `Path(input)` instead.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, error = $err:path {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        choice_enum! {
            @define [|value: String| $err(value)]
            $(#[$meta])*
            $name { $( $(#[$vmeta])* $variant => $label ),+ }
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        choice_enum! {
            @define [|value: String| $crate::error::TypeError::InvalidChoice { field: $field, value }]
            $(#[$meta])*
            $name { $( $(#[$vmeta])* $variant => $label ),+ }
        }
    };
    (
        @define [$reject:expr]
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The operator-facing label.
            pub fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ($reject)(s.to_string()))
            }
        }
    };
}

pub mod batch;
pub mod error;
pub mod identity;
pub mod location;
pub mod processing;
pub mod species;
pub mod temporal;
pub mod testing;
pub mod validation;

pub use batch::{Batch, RecallRecord};
pub use error::TypeError;
pub use identity::BatchId;
pub use location::GeoPoint;
pub use processing::{
    Fineness, MeshSize, PackagingMaterial, ProcessingKind, ProcessingParams, ProcessingStep,
    SealType,
};
pub use species::Species;
pub use temporal::{Clock, ManualClock, SystemClock, Timestamp};
pub use testing::{TestKind, TestMeasurement, TestResult};
pub use validation::Validate;
