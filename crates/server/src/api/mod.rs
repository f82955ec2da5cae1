pub mod error;
pub mod favorites;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod search;

pub use routes::create_router;
