pub mod record_store;

pub use record_store::RecordStore;
#[cfg(test)]
pub use record_store::MockRecordStore;
