pub mod bench;
pub mod common;
pub mod generate;
pub mod kernels;
pub mod solve;
pub mod verify;
