mod detach;
mod fan_out;
mod registry;
mod stats;

pub(crate) use detach::detach;
pub(crate) use fan_out::FanOut;
pub(crate) use registry::{ListenerRegistry, SharedListener};
pub(crate) use stats::{InFlight, Stats};
