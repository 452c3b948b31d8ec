pub mod backends;
pub mod convert;
pub mod parse;
pub mod summarize;
