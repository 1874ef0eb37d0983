//! Chart aggregate: configuration, scaling services and the owned chart state.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use services::*;
pub use value_objects::*;
