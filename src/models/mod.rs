pub mod candidate;
pub mod dropdown;
pub mod user;
