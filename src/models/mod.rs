pub mod access_token;
pub mod bouquet;
pub mod user;

pub use access_token::AccessToken;
pub use bouquet::{Bouquet, BouquetResponse};
pub use user::{User, UserResponse};
