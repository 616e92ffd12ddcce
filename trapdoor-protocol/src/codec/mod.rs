use std::num::NonZeroUsize;

use bytes::{Buf, BufMut};

use crate::ser::ReadingError;

pub mod var_int;
pub mod var_long;

pub trait Codec<T> {
    const MAX_SIZE: NonZeroUsize;

    fn written_size(&self) -> usize;

    fn encode(&self, write: &mut impl BufMut);

    fn decode(read: &mut impl Buf) -> Result<T, ReadingError>;
}
