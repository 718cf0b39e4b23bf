//! Reusable widgets shared between views

pub mod sparkline;

pub use sparkline::FluxSparkline;
