pub mod handlers;
pub mod net;
pub mod run;
pub mod session;

#[cfg(test)]
pub mod test_helpers;
