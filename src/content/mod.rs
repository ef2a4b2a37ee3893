pub mod card;
pub mod complexity;
pub mod filter;
pub mod summary;

pub use card::IntelCard;
pub use complexity::calculate_complexity;
pub use filter::apply_content_filter;
pub use summary::generate_summary;
