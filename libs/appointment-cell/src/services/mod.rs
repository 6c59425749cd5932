pub mod access;
pub mod booking;
pub mod notify;
pub mod workflow;
