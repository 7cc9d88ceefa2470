pub mod backup;
pub mod config_io;
pub mod snapshot;
pub mod storage;
