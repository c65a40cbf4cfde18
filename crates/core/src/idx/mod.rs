pub mod ft;
pub mod search;
