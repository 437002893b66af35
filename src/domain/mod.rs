// Domain layer: feature contract, model families and the ports the runner depends on.

pub mod model;
pub mod ports;
