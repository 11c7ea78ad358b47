mod core;
mod error;
mod health;
mod ledger;

pub use crate::{core::*, error::*, health::*, ledger::*};
