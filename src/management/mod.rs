mod auth;
mod favorites;

pub use auth::TokenError;
pub use auth::TokenManager;
pub use favorites::FavoritesStore;
pub use favorites::StoreError;
