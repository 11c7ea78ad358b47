mod error;
mod fixed;
mod gateway;

pub use {error::*, fixed::*, gateway::*};
