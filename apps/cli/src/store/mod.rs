//! On-disk storage: word collection, session log, scheduler item pools.

pub mod error;
pub mod items;
pub mod log;
pub mod words;

pub use error::StoreError;
pub use items::SchedulerStore;
pub use log::SessionLog;
pub use words::WordStore;
