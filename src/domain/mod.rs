// Domain layer: meal model, the meal collection and the ports the core talks through.

pub mod meals;
pub mod model;
pub mod ports;
