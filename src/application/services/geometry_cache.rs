//! In-process cache of parsed country boundaries.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::Country;
use crate::domain::geometry::{Geometry, GeometryParseError, parse_boundary};

struct Entry {
    updated_at: DateTime<Utc>,
    geometry: Arc<Geometry>,
}

/// Parsed [`Geometry`] per country code, stamped with the record's `updated_at`.
///
/// An entry is reused only while the stamp matches the record being checked,
/// so a record changed by another instance is reparsed on first use. Payloads
/// that fail to parse are never stored.
#[derive(Default)]
pub struct GeometryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the parsed boundary of `country`, parsing and storing it on miss.
    ///
    /// # Errors
    ///
    /// Returns the [`GeometryParseError`] of a malformed `polygon_data`.
    pub fn get_or_parse(&self, country: &Country) -> Result<Arc<Geometry>, GeometryParseError> {
        if let Some(geometry) = self.lookup(country) {
            return Ok(geometry);
        }

        let geometry = Arc::new(parse_boundary(&country.polygon_data)?);

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                country.country_code.clone(),
                Entry {
                    updated_at: country.updated_at,
                    geometry: Arc::clone(&geometry),
                },
            );
        }

        Ok(geometry)
    }

    fn lookup(&self, country: &Country) -> Option<Arc<Geometry>> {
        let entries = self.entries.read().ok()?;
        entries
            .get(&country.country_code)
            .filter(|entry| entry.updated_at == country.updated_at)
            .map(|entry| Arc::clone(&entry.geometry))
    }

    /// Drops the entry for `code`, if any.
    pub fn invalidate(&self, code: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(code);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
