//! Command implementations for malha

pub mod batch;
pub mod dispatch;
pub mod info;
pub mod metrics;
pub mod path;
pub mod report;
pub mod route;
pub mod traverse;
