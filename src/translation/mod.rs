// Content and message normalization
// Author: kelexine (https://github.com/kelexine)

pub mod contents;
pub mod messages;

pub use contents::{convert_contents, Converted};
pub use messages::convert_messages;
