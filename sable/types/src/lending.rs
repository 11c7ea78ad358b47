mod events;
mod interest_rate;
mod market;
mod position;

pub use {events::*, interest_rate::*, market::*, position::*};
