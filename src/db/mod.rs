pub mod access_tokens;
pub mod bouquets;
pub mod users;
