pub mod apply;
pub mod batch;
pub mod plan;
pub mod policies;
pub mod resolve;
