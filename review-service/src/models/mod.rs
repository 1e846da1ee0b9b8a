pub mod errors;
pub mod memory;
pub mod requests;
pub mod responses;
pub mod storage;
