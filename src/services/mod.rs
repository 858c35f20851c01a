pub mod availability;
pub mod carousel;
pub mod inquiry;
pub mod quote;
pub mod session;
pub mod submission;
pub mod validation;
