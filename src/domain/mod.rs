//! Domain layer: price samples, the bounded series and the chart scaling rules.
//! Nothing in here touches the DOM, so all of it runs in native tests.

pub mod chart;
pub mod errors;
pub mod logging;
pub mod market_data;
