pub mod catalog;
pub mod outcome;
pub mod responses;
