//! Body catalog data types

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// sRGB color stored as 8-bit channels, written as `"#rrggbb"` in catalog files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8(pub [u8; 3]);

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Channels as linear-ish unit floats for the texture canvas (no gamma change)
    pub fn to_unit(self) -> [f32; 3] {
        let [r, g, b] = self.0;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }

    pub fn to_color(self) -> Color {
        let [r, g, b] = self.0;
        Color::srgb_u8(r, g, b)
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(CatalogError::InvalidColor(value));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| CatalogError::InvalidColor(value.clone()))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl From<Rgb8> for String {
    fn from(value: Rgb8) -> Self {
        let [r, g, b] = value.0;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Immutable description of one orbiting body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    /// Identifier, also used to look up decoration and rotation traits
    pub name: String,
    pub radius: f32,
    pub orbit_radius: f32,
    pub color: Rgb8,
    /// Base angular speed in radians per frame
    pub speed: f32,
    #[serde(default)]
    pub description: String,
}

impl BodyDescriptor {
    fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |reason: &str| CatalogError::InvalidDescriptor {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("empty identifier"));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid("radius must be positive"));
        }
        if !(self.orbit_radius.is_finite() && self.orbit_radius >= 0.0) {
            return Err(invalid("orbit radius must not be negative"));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(invalid("base speed must not be negative"));
        }
        Ok(())
    }
}

/// Ordered, validated list of body descriptors
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyCatalog {
    bodies: Vec<BodyDescriptor>,
}

impl BodyCatalog {
    /// Build a catalog, rejecting empty lists, duplicate identifiers and
    /// out-of-range descriptor fields.
    pub fn new(bodies: Vec<BodyDescriptor>) -> Result<Self, CatalogError> {
        let catalog = Self { bodies };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.bodies.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, body) in self.bodies.iter().enumerate() {
            body.validate()?;
            if self.bodies[..i].iter().any(|b| b.name == body.name) {
                return Err(CatalogError::DuplicateName(body.name.clone()));
            }
        }
        Ok(())
    }

    pub fn bodies(&self) -> &[BodyDescriptor] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
