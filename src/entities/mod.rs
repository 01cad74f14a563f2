mod address;
mod address_book;
mod route;
mod submission;

pub use address::{normalize_text, AddressEntry, Role, MAX_TEXT_LEN};
pub use address_book::{seed_entries, AddressBook};
pub use route::{RouteLeg, RouteRequest, RouteResult, RouteStep, TextValue, TravelMode};
pub use submission::Submission;
