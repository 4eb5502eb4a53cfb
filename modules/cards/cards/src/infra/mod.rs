pub mod blob;
pub mod session;
pub mod storage;
