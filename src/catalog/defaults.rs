//! Built-in solar system catalog

use crate::catalog::types::{BodyCatalog, BodyDescriptor, Rgb8};

// (name, radius, orbit radius, color, base speed, description)
const DEFAULT_BODIES: [(&str, f32, f32, Rgb8, f32, &str); 8] = [
    (
        "Mercury",
        0.8,
        16.0,
        Rgb8::new(0x8c, 0x78, 0x53),
        0.040,
        "The smallest planet and the closest to the Sun, covered in impact craters.",
    ),
    (
        "Venus",
        1.2,
        22.0,
        Rgb8::new(0xe6, 0xc2, 0x7a),
        0.015,
        "Wrapped in thick, reflective clouds that trap heat in a runaway greenhouse effect.",
    ),
    (
        "Earth",
        1.3,
        30.0,
        Rgb8::new(0x2a, 0x5c, 0xaa),
        0.010,
        "Our home world, with liquid oceans, drifting clouds and polar ice.",
    ),
    (
        "Mars",
        1.0,
        38.0,
        Rgb8::new(0xc1, 0x44, 0x0e),
        0.008,
        "The red planet, with dusty plains, ancient craters and frozen caps.",
    ),
    (
        "Jupiter",
        3.2,
        52.0,
        Rgb8::new(0xd8, 0xca, 0x9d),
        0.004,
        "A gas giant striped with storm bands and home to the Great Red Spot.",
    ),
    (
        "Saturn",
        2.7,
        66.0,
        Rgb8::new(0xe3, 0xd5, 0xa4),
        0.003,
        "A pale banded giant best known for its bright ring system.",
    ),
    (
        "Uranus",
        1.9,
        78.0,
        Rgb8::new(0x9f, 0xd7, 0xe0),
        0.002,
        "An ice giant tipped on its side, with a hazy, featureless cyan atmosphere.",
    ),
    (
        "Neptune",
        1.8,
        90.0,
        Rgb8::new(0x3f, 0x54, 0xba),
        0.001,
        "The windiest planet, with deep blue clouds and dark storm systems.",
    ),
];

/// The catalog compiled into the binary
pub fn default_catalog() -> BodyCatalog {
    let bodies = DEFAULT_BODIES
        .iter()
        .map(
            |&(name, radius, orbit_radius, color, speed, description)| BodyDescriptor {
                name: name.to_string(),
                radius,
                orbit_radius,
                color,
                speed,
                description: description.to_string(),
            },
        )
        .collect();
    match BodyCatalog::new(bodies) {
        Ok(catalog) => catalog,
        Err(err) => unreachable!("built-in catalog is invalid: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.bodies()[2].name, "Earth");
        // Orbits are ordered outward and do not overlap
        for pair in catalog.bodies().windows(2) {
            assert!(pair[0].orbit_radius < pair[1].orbit_radius);
        }
    }
}
