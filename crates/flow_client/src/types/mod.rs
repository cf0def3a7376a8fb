mod outcome;
mod request;

pub use outcome::{Outcome, Swapped};
pub use request::FlowRequest;
