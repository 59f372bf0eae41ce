//! Command implementations

pub mod call;
pub mod serve;
pub mod serve_mcp;
pub mod serve_rest;
pub mod tools;

pub use call::CallArgs;
pub use serve::ServeArgs;
pub use serve_rest::ServeRestArgs;
