mod persistence;
mod service;

pub use persistence::StoredEvents;
pub use service::EventStore;
