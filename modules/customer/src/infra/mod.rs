pub mod permissions;
pub mod rpc;
