pub mod call;
pub mod status;
