pub mod descendants;
pub mod group;
pub mod strings;

pub use descendants::descendants_trimmed;
pub use group::group_adjacent;
pub use strings::{needs_space_preserve, string_concatenate};
