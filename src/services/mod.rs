// Service module exports

pub mod formatter;
pub mod store;
