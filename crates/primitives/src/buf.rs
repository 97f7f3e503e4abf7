use crate::impl_buf;

// 20-byte buf, useful for addresses
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Buf20([u8; 20]);
impl_buf!(Buf20, 20);

// 32-byte buf, useful for hashes
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Buf32([u8; 32]);
impl_buf!(Buf32, 32);
