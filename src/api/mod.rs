pub mod routes;

pub use routes::fetch_routes;
