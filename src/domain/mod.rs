// Domain layer: transient value types and the ports demos are written against.

pub mod model;
pub mod ports;
