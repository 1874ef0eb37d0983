//! Market data aggregate: price samples, the bounded series, the simulated feed
//! and the order-ticket arithmetic.

pub mod entities;
pub mod order_form;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use order_form::*;
pub use services::*;
pub use value_objects::*;
