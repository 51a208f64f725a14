pub mod elsys;
pub mod nas;
