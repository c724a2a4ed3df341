//! Show model

use chrono::NaiveDateTime;
use serde::Serialize;

use super::form::{FormData, FormError};

/// A scheduled appearance of one artist at one venue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Show {
    /// Database ID (0 until inserted)
    pub id: i64,
    /// When the booking was recorded
    pub date: NaiveDateTime,
    pub start_time: NaiveDateTime,
    pub artist_id: i64,
    pub venue_id: i64,
}

impl Show {
    pub fn new(artist_id: i64, venue_id: i64, start_time: NaiveDateTime, date: NaiveDateTime) -> Self {
        Self {
            id: 0,
            date,
            start_time,
            artist_id,
            venue_id,
        }
    }

    /// Build a booking from the show form, stamped with `booked_at`
    pub fn from_form(form: &FormData, booked_at: NaiveDateTime) -> Result<Self, FormError> {
        let artist_id = form.id("artist_id")?;
        let venue_id = form.id("venue_id")?;
        let start_time = form.datetime("start_time")?;

        Ok(Self::new(artist_id, venue_id, start_time, booked_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::dates::parse_datetime;

    #[test]
    fn test_date_is_booking_time() {
        let booked_at = parse_datetime("2026-10-19 12:00:00").unwrap();
        let form = FormData::new(vec![
            ("artist_id".into(), "4".into()),
            ("venue_id".into(), "1".into()),
            ("start_time".into(), "2027-01-01 20:00:00".into()),
            ("date".into(), "2027-01-01".into()),
        ]);

        let show = Show::from_form(&form, booked_at).unwrap();
        assert_eq!(show.date, booked_at);
        assert_eq!(show.start_time, parse_datetime("2027-01-01 20:00:00").unwrap());
        assert_eq!((show.artist_id, show.venue_id), (4, 1));
    }

    #[test]
    fn test_bad_start_time() {
        let form = FormData::new(vec![
            ("artist_id".into(), "4".into()),
            ("venue_id".into(), "1".into()),
            ("start_time".into(), "soon".into()),
        ]);
        assert!(matches!(
            Show::from_form(&form, parse_datetime("2026-10-19").unwrap()),
            Err(FormError::InvalidDateTime { field: "start_time", .. })
        ));
    }
}
