//! Core domain types.
//!
//! Pure data with no infrastructure dependencies.

mod bundle;
mod info;
mod layout;

pub use bundle::{BinaryType, Bundle, ExecutableCacheSlot, ExecutableLookup};
pub use info::{EXECUTABLE_KEY, IDENTIFIER_KEY, InfoDictionary};
pub use layout::{InstallStyle, LayoutVersion};
