pub mod addresses;
pub mod links;
pub mod routes;
pub mod submissions;
