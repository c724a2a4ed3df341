//! Data models
//!
//! This module contains the core data structures used throughout the application.

mod artist;
mod form;
pub mod genres;
mod listing;
mod show;
mod venue;

pub use artist::Artist;
pub use form::{FormData, FormError, STATE_CHOICES};
pub use genres::GENRE_CHOICES;
pub use listing::{EntitySummary, LocatedSummary, NamedEntity, ScheduledShow, ShowListingRow};
pub use show::Show;
pub use venue::Venue;
