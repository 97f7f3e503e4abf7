pub use crate::{
    buf::{Buf20, Buf32},
    params::RollupParams,
};
