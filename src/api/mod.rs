pub mod exercises;
pub mod extract;
pub mod responses;
pub mod server;
pub mod users;

#[cfg(test)]
mod test_support;
