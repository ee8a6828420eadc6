pub mod comment;
pub mod critic;
pub mod session;
pub mod user;

pub use comment::*;
pub use critic::*;
pub use session::*;
pub use user::*;
