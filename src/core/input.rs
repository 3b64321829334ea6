//! Input Collector: turns raw form strings into a SearchQuery
//!
//! Every field is checked before any upstream call. The first bad field
//! wins and carries its own corrective message.

use crate::error::{PulseError, Result};
use crate::types::{FormField, SearchForm, SearchQuery};
use crate::{LAT_MAX, LAT_MIN, LON_MAX, LON_MIN, RADIUS_MAX_M};

/// Form validator
#[derive(Debug, Default, Clone)]
pub struct InputCollector;

impl InputCollector {
    pub fn new() -> Self {
        Self
    }

    /// Validate the form, returning the query or a ValidationError
    pub fn collect(&self, form: &SearchForm) -> Result<SearchQuery> {
        let lat = parse_in_range(&form.latitude, FormField::Latitude, LAT_MIN, LAT_MAX)?;
        let lon = parse_in_range(&form.longitude, FormField::Longitude, LON_MIN, LON_MAX)?;
        let radius_m = parse_in_range(&form.radius, FormField::Radius, 0.0, RADIUS_MAX_M)?;

        let loc_type = form.location_type.trim();
        if loc_type.is_empty() {
            return Err(PulseError::validation(
                FormField::LocationType,
                "Please enter a type of location (e.g. restaurant)",
            ));
        }

        let keyword = form
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        Ok(SearchQuery {
            lat,
            lon,
            radius_m,
            loc_type: loc_type.to_string(),
            keyword,
        })
    }
}

fn parse_in_range(raw: &str, field: FormField, min: f64, max: f64) -> Result<f64> {
    let message = match field {
        FormField::Latitude => "Latitude must be a number between -90 and 90",
        FormField::Longitude => "Longitude must be a number between -180 and 180",
        _ => "Radius must be a number of meters between 0 and 10000000",
    };

    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| PulseError::validation(field, message))?;

    // "NaN" and "inf" parse as f64
    if !value.is_finite() || value < min || value > max {
        return Err(PulseError::validation(field, message));
    }
    Ok(value)
}
