//! Small shared primitives: fixed byte buffers, content hashing, and the
//! chain parameters everything else reads.

pub mod buf;
pub mod hash;
pub mod macros;
pub mod params;

pub mod prelude;
