//! Artist model

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::form::{FormData, FormError};

/// A performer that can be booked into shows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    /// Database ID (0 until inserted)
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub seeking_venue: bool,
    #[serde(default)]
    pub seeking_description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl Artist {
    pub fn from_form(form: &FormData) -> Result<Self, FormError> {
        let mut artist = Self::default();
        artist.apply_form(form)?;
        Ok(artist)
    }

    /// Overwrite every editable field from a submitted form
    pub fn apply_form(&mut self, form: &FormData) -> Result<(), FormError> {
        let name = form.required("name")?;
        let city = form.required("city")?;
        let state = form.required("state")?;
        let phone = form.required("phone")?;
        let genres = form.required_all("genres")?;

        self.name = name;
        self.city = city;
        self.state = state;
        self.phone = phone;
        self.genres = genres;
        self.image_link = form.optional("image_link");
        self.facebook_link = form.optional("facebook_link");
        self.website = form.optional("website_link");
        self.seeking_venue = form.checkbox("seeking_venue");
        self.seeking_description = form.optional("seeking_description");

        Ok(())
    }

    pub fn form_values(&self) -> Value {
        json!({
            "name": self.name,
            "city": self.city,
            "state": self.state,
            "phone": self.phone,
            "genres": self.genres,
            "image_link": self.image_link,
            "facebook_link": self.facebook_link,
            "website_link": self.website,
            "seeking_venue": self.seeking_venue,
            "seeking_description": self.seeking_description,
        })
    }
}
