// Domain layer: page/HTTP models and the ports the bindings talk through.

pub mod model;
pub mod ports;
