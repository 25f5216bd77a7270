use super::native::native_directories;
use super::{DirectoryStrategy, SearchRequest};

/// A `Name.resources` directory sitting next to its bare binary.
///
/// Same enumeration as [`NativeLayout`](super::NativeLayout), with the sibling
/// rule applied whatever the platform advertises.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreestandingLayout;

impl DirectoryStrategy for FreestandingLayout {
    fn candidate_directories(&self, request: &SearchRequest<'_>) -> Vec<String> {
        native_directories(request, true)
    }
}
