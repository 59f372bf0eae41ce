pub mod dispatcher;
pub mod error;

pub use dispatcher::{Dispatcher, PreparedRequest};
pub use error::{RuntimeError, RuntimeResult};
