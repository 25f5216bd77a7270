//! Path primitives for bundle resolution.
//!
//! Everything here is pure string arithmetic:
//! - Joining components with the target's separator
//! - Last-component and extension handling
//! - Anchored prefix/suffix stripping for binary filenames
//!
//! # Design
//!
//! - Paths are `&str`/`String`, interpreted according to a [`PathStyle`]
//! - No filesystem access; existence checks live behind ports

mod components;
mod style;

pub use components::{
    absolutize, delete_path_extension, is_absolute, join_relative, last_component,
    last_component_without_extension, length_after_removing_last_component, normalize_lexically,
    parent, path_extension, start_of_last_component, strip_prefix_suffix,
};
pub use style::PathStyle;
