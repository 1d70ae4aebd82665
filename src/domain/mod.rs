// Domain layer: records and the ports every storage backend implements.

pub mod model;
pub mod ports;
