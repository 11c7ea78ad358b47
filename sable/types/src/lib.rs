mod address;
mod bounded;
mod coin;
mod denom;
mod error;
pub mod lending;
pub mod oracle;
mod result;
mod time;

pub use {address::*, bounded::*, coin::*, denom::*, error::*, result::*, time::*};
