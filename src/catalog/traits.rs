//! Identifier-keyed presentation traits: surface recipe and self-rotation.
//!
//! Rotation speeds are presentation values in radians per frame and are not
//! derived from the catalog's orbital data.

use crate::texture::recipes::{Decoration, Tint};

/// Per-body presentation traits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTraits {
    pub rotation_speed: f32,
    pub decorations: &'static [Decoration],
}

/// Central body self-rotation, radians per frame
pub const SUN_ROTATION_SPEED: f32 = 0.002;

/// Used for identifiers without an entry in the table
pub static DEFAULT_TRAITS: BodyTraits = BodyTraits {
    rotation_speed: 0.01,
    decorations: &[],
};

const WHITE: Tint = Tint::Fixed([0.95, 0.96, 0.98]);

static BODY_TRAITS: [(&str, BodyTraits); 8] = [
    (
        "mercury",
        BodyTraits {
            rotation_speed: 0.004,
            decorations: &[Decoration::Craters {
                count: 90,
                radius: (0.006, 0.035),
                depth: 0.35,
            }],
        },
    ),
    (
        "venus",
        BodyTraits {
            rotation_speed: 0.002,
            decorations: &[
                Decoration::Blobs {
                    count: 40,
                    radius: (0.04, 0.12),
                    tint: Tint::Shade(1.15),
                    alpha: 0.25,
                },
                Decoration::Swirls {
                    count: 10,
                    amplitude: (0.01, 0.04),
                    thickness: 0.015,
                    tint: Tint::Shade(0.85),
                    alpha: 0.3,
                },
            ],
        },
    ),
    (
        "earth",
        BodyTraits {
            rotation_speed: 0.02,
            decorations: &[
                Decoration::Blobs {
                    count: 28,
                    radius: (0.04, 0.11),
                    tint: Tint::Fixed([0.22, 0.48, 0.2]),
                    alpha: 0.85,
                },
                Decoration::Blobs {
                    count: 36,
                    radius: (0.02, 0.07),
                    tint: WHITE,
                    alpha: 0.45,
                },
                Decoration::PolarCaps {
                    extent: 0.07,
                    tint: WHITE,
                    alpha: 0.8,
                },
            ],
        },
    ),
    (
        "mars",
        BodyTraits {
            rotation_speed: 0.018,
            decorations: &[
                Decoration::Blobs {
                    count: 20,
                    radius: (0.04, 0.1),
                    tint: Tint::Shade(0.7),
                    alpha: 0.4,
                },
                Decoration::Craters {
                    count: 35,
                    radius: (0.005, 0.025),
                    depth: 0.25,
                },
                Decoration::PolarCaps {
                    extent: 0.045,
                    tint: WHITE,
                    alpha: 0.75,
                },
            ],
        },
    ),
    (
        "jupiter",
        BodyTraits {
            rotation_speed: 0.04,
            decorations: &[
                Decoration::Bands {
                    count: 16,
                    height: (0.015, 0.06),
                    spread: 0.25,
                    alpha: 0.55,
                },
                Decoration::Swirls {
                    count: 8,
                    amplitude: (0.004, 0.015),
                    thickness: 0.01,
                    tint: Tint::Shade(1.2),
                    alpha: 0.25,
                },
                Decoration::Storm {
                    center: (0.65, 0.62),
                    radii: (0.1, 0.055),
                    tint: Tint::Fixed([0.72, 0.3, 0.2]),
                    alpha: 0.85,
                },
            ],
        },
    ),
    (
        "saturn",
        BodyTraits {
            rotation_speed: 0.038,
            decorations: &[Decoration::Bands {
                count: 12,
                height: (0.02, 0.07),
                spread: 0.12,
                alpha: 0.4,
            }],
        },
    ),
    (
        "uranus",
        BodyTraits {
            rotation_speed: 0.03,
            decorations: &[Decoration::Swirls {
                count: 6,
                amplitude: (0.005, 0.02),
                thickness: 0.03,
                tint: Tint::Shade(1.1),
                alpha: 0.15,
            }],
        },
    ),
    (
        "neptune",
        BodyTraits {
            rotation_speed: 0.032,
            decorations: &[
                Decoration::Swirls {
                    count: 9,
                    amplitude: (0.01, 0.03),
                    thickness: 0.02,
                    tint: Tint::Shade(1.3),
                    alpha: 0.25,
                },
                Decoration::Storm {
                    center: (0.4, 0.4),
                    radii: (0.08, 0.045),
                    tint: Tint::Shade(0.45),
                    alpha: 0.8,
                },
            ],
        },
    ),
];

/// Look up traits by identifier (case-insensitive), falling back to [`DEFAULT_TRAITS`]
pub fn body_traits(name: &str) -> &'static BodyTraits {
    BODY_TRAITS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, traits)| traits)
        .unwrap_or(&DEFAULT_TRAITS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(body_traits("Earth"), body_traits("earth"));
        assert_eq!(body_traits("EARTH").rotation_speed, 0.02);
    }

    #[test]
    fn test_unknown_identifier_uses_default() {
        let traits = body_traits("Vulcan");
        assert_eq!(traits, &DEFAULT_TRAITS);
        assert!(traits.decorations.is_empty());
    }

    #[test]
    fn test_builtin_bodies_have_dedicated_traits() {
        for body in default_catalog().bodies() {
            assert_ne!(body_traits(&body.name), &DEFAULT_TRAITS, "{}", body.name);
        }
    }
}
