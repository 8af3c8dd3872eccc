pub mod alerts;
pub mod models;
pub mod overview;
pub mod policies;
pub mod stream;
