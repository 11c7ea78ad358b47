mod dec;
mod error;
mod fraction;
mod int;
mod is_zero;

pub use {dec::*, error::*, fraction::*, int::*, is_zero::*};
