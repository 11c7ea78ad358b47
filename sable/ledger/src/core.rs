mod accrual;
mod interest_rate;
mod shares;

pub use {accrual::*, interest_rate::*, shares::*};
