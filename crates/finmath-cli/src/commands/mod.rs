pub mod lending;
pub mod savings;
pub mod tvm;
