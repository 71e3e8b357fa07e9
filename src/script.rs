pub mod budget;
pub mod compose;
pub mod duration;
pub mod model;
