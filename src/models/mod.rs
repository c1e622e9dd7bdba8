pub mod finding;
pub mod report;
pub mod request;

pub use finding::*;
pub use report::*;
pub use request::*;
