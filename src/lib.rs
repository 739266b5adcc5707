pub mod catalog;
pub mod constants;
pub mod helpers;
