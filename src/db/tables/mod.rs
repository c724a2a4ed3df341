//! Database table operations

mod artist_table;
mod show_table;
mod venue_table;

pub use artist_table::ArtistTable;
pub use show_table::ShowTable;
pub use venue_table::VenueTable;

/// Keep the rows whose name contains `term`, ignoring case in any script
fn retain_matching<T>(rows: &mut Vec<T>, term: &str, name: impl Fn(&T) -> &str) {
    let needle = term.to_lowercase();
    rows.retain(|row| name(row).to_lowercase().contains(&needle));
}
