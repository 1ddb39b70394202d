// Domain layer: cart model and the ports the store talks to.

pub mod model;
pub mod ports;
