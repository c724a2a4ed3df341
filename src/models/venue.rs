//! Venue model

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::form::{FormData, FormError};

/// A location that can host shows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Database ID (0 until inserted)
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_talent: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
    /// Stored as an empty string when not given
    #[serde(default)]
    pub website: String,
}

impl Venue {
    /// Build a new, not yet persisted venue from a submitted form
    pub fn from_form(form: &FormData) -> Result<Self, FormError> {
        let mut venue = Self::default();
        venue.apply_form(form)?;
        Ok(venue)
    }

    /// Overwrite every editable field from a submitted form.
    ///
    /// Nothing is changed unless the whole form is acceptable.
    pub fn apply_form(&mut self, form: &FormData) -> Result<(), FormError> {
        let name = form.required("name")?;
        let city = form.required("city")?;
        let state = form.required("state")?;
        let address = form.required("address")?;
        let phone = form.required("phone")?;
        let website = form.required("website_link")?;

        self.name = name;
        self.city = city;
        self.state = state;
        self.address = address;
        self.phone = phone;
        self.genres = form.get_all("genres");
        self.image_link = form.optional("image_link");
        self.facebook_link = form.optional("facebook_link");
        self.website = website;
        self.seeking_talent = form.checkbox("seeking_talent");
        self.seeking_description = form.optional("seeking_description");

        Ok(())
    }

    /// Field values keyed the way the edit form names them
    pub fn form_values(&self) -> Value {
        json!({
            "name": self.name,
            "city": self.city,
            "state": self.state,
            "address": self.address,
            "phone": self.phone,
            "genres": self.genres,
            "image_link": self.image_link,
            "facebook_link": self.facebook_link,
            "website_link": self.website,
            "seeking_talent": self.seeking_talent,
            "seeking_description": self.seeking_description,
        })
    }
}
