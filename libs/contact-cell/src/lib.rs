pub mod handlers;
pub mod models;
pub mod router;

pub use models::ContactDetails;
pub use router::contact_routes;
