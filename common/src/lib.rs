pub mod constants;
pub mod name;
pub mod net;
pub mod problem;
pub mod protocol;
pub mod time;
