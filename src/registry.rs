use std::f64::consts::PI;

use serde::Serialize;
use thiserror::Error;

/// Solid selectable in the calculator.
///
/// The catalog is data-driven: UI, CLI and preview all iterate [`ShapeKind::ALL`]
/// and the definition's field slice, so adding a solid means adding a variant
/// and its definition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cylinder,
    Sphere,
    Cone,
    Prism,
    Ellipsoid,
}

/// Static description of one solid: identity, display strings and fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeDefinition {
    pub id: &'static str,
    pub display_name: &'static str,
    pub formula: &'static str,
    pub fields: &'static [FieldSpec],
}

/// One dimension the user has to fill in for a solid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
    pub min: f64,
}

/// Raised when a shape id is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shape id: {0}")]
pub struct UnknownShapeError(pub String);

/// Validated field-id to value mapping, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues(Vec<(&'static str, f64)>);

impl FieldValues {
    pub fn insert(&mut self, id: &'static str, value: f64) {
        self.0.push((id, value));
    }

    /// Reads a field value; absent ids contribute 0 to the volume.
    pub fn get(&self, id: &str) -> f64 {
        self.0
            .iter()
            .find(|(field, _)| *field == id)
            .map(|(_, value)| *value)
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ShapeKind {
    /// Catalog order, as offered by the selector.
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Cylinder,
        ShapeKind::Sphere,
        ShapeKind::Cone,
        ShapeKind::Prism,
        ShapeKind::Ellipsoid,
    ];

    /// Looks a shape up by its catalog id.
    pub fn from_id(id: &str) -> Result<Self, UnknownShapeError> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == id)
            .ok_or_else(|| UnknownShapeError(id.to_string()))
    }

    pub fn definition(self) -> &'static ShapeDefinition {
        match self {
            ShapeKind::Cylinder => &CYLINDER,
            ShapeKind::Sphere => &SPHERE,
            ShapeKind::Cone => &CONE,
            ShapeKind::Prism => &PRISM,
            ShapeKind::Ellipsoid => &ELLIPSOID,
        }
    }

    pub fn id(self) -> &'static str {
        self.definition().id
    }

    pub fn display_name(self) -> &'static str {
        self.definition().display_name
    }

    pub fn formula(self) -> &'static str {
        self.definition().formula
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        self.definition().fields
    }

    /// Computes the volume from an already validated set of field values.
    ///
    /// Multiplications keep the association order of the printed formulas so
    /// results match the reference values bit-for-bit before rounding.
    pub fn volume(self, values: &FieldValues) -> f64 {
        match self {
            ShapeKind::Cylinder => PI * values.get("radio").powi(2) * values.get("altura"),
            ShapeKind::Sphere => 4.0 / 3.0 * PI * values.get("radio").powi(3),
            ShapeKind::Cone => {
                (1.0 / 3.0) * PI * values.get("radio").powi(2) * values.get("altura")
            }
            ShapeKind::Prism => values.get("largo") * values.get("ancho") * values.get("altura"),
            ShapeKind::Ellipsoid => {
                4.0 / 3.0 * PI * values.get("a") * values.get("b") * values.get("c")
            }
        }
    }
}

const NON_NEGATIVE: &str = "≥ 0";

static CYLINDER: ShapeDefinition = ShapeDefinition {
    id: "cilindro",
    display_name: "Cilindro",
    formula: "V = π · r² · h",
    fields: &[
        FieldSpec {
            id: "radio",
            label: "Radio (r)",
            hint: NON_NEGATIVE,
            min: 0.0,
        },
        FieldSpec {
            id: "altura",
            label: "Altura (h)",
            hint: NON_NEGATIVE,
            min: 0.0,
        },
    ],
};

static SPHERE: ShapeDefinition = ShapeDefinition {
    id: "esfera",
    display_name: "Esfera",
    formula: "V = 4/3 · π · r³",
    fields: &[FieldSpec {
        id: "radio",
        label: "Radio (r)",
        hint: NON_NEGATIVE,
        min: 0.0,
    }],
};

static CONE: ShapeDefinition = ShapeDefinition {
    id: "cono",
    display_name: "Cono",
    formula: "V = (1/3) · π · r² · h",
    fields: &[
        FieldSpec {
            id: "radio",
            label: "Radio (r)",
            hint: NON_NEGATIVE,
            min: 0.0,
        },
        FieldSpec {
            id: "altura",
            label: "Altura (h)",
            hint: NON_NEGATIVE,
            min: 0.0,
        },
    ],
};

static PRISM: ShapeDefinition = ShapeDefinition {
    id: "prisma",
    display_name: "Prisma rectangular",
    formula: "V = l · a · h",
    fields: &[
        FieldSpec {
            id: "largo",
            label: "Largo (l)",
            hint: NON_NEGATIVE,
            min: 0.0,
        },
        FieldSpec {
            id: "ancho",
            label: "Ancho (a)",
            hint: NON_NEGATIVE,
            min: 0.0,
        },
        FieldSpec {
            id: "altura",
            label: "Altura (h)",
            hint: NON_NEGATIVE,
            min: 0.0,
        },
    ],
};

static ELLIPSOID: ShapeDefinition = ShapeDefinition {
    id: "elipsoide",
    display_name: "Elipsoide",
    formula: "V = 4/3 · π · a · b · c",
    fields: &[
        FieldSpec {
            id: "a",
            label: "Semieje (a)",
            hint: NON_NEGATIVE,
            min: 0.0,
        },
        FieldSpec {
            id: "b",
            label: "Semieje (b)",
            hint: NON_NEGATIVE,
            min: 0.0,
        },
        FieldSpec {
            id: "c",
            label: "Semieje (c)",
            hint: NON_NEGATIVE,
            min: 0.0,
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&'static str, f64)]) -> FieldValues {
        let mut values = FieldValues::default();
        for (id, value) in pairs.iter().copied() {
            values.insert(id, value);
        }
        values
    }

    #[test]
    fn catalog_keeps_selector_order() {
        let ids: Vec<&str> = ShapeKind::ALL.iter().map(|kind| kind.id()).collect();
        assert_eq!(ids, ["cilindro", "esfera", "cono", "prisma", "elipsoide"]);
    }

    #[test]
    fn from_id_resolves_known_shapes() {
        assert_eq!(ShapeKind::from_id("esfera").unwrap(), ShapeKind::Sphere);
        assert_eq!(ShapeKind::from_id("prisma").unwrap(), ShapeKind::Prism);
    }

    #[test]
    fn from_id_rejects_unknown_shapes() {
        let err = ShapeKind::from_id("dodecaedro").unwrap_err();
        assert_eq!(err, UnknownShapeError("dodecaedro".to_string()));
        assert!(err.to_string().contains("dodecaedro"));
    }

    #[test]
    fn fields_follow_declaration_order() {
        let ids: Vec<&str> = ShapeKind::Prism.fields().iter().map(|f| f.id).collect();
        assert_eq!(ids, ["largo", "ancho", "altura"]);
        let labels: Vec<&str> = ShapeKind::Ellipsoid
            .fields()
            .iter()
            .map(|f| f.label)
            .collect();
        assert_eq!(labels, ["Semieje (a)", "Semieje (b)", "Semieje (c)"]);
    }

    #[test]
    fn cylinder_volume_matches_formula() {
        let v = ShapeKind::Cylinder.volume(&values(&[("radio", 2.0), ("altura", 5.0)]));
        assert!((v - PI * 20.0).abs() < 1e-12);
    }

    #[test]
    fn sphere_volume_matches_formula() {
        let v = ShapeKind::Sphere.volume(&values(&[("radio", 3.0)]));
        assert!((v - 113.09733552923255).abs() < 1e-9);
    }

    #[test]
    fn cone_is_a_third_of_the_cylinder() {
        let dims = values(&[("radio", 2.0), ("altura", 5.0)]);
        let cone = ShapeKind::Cone.volume(&dims);
        let cylinder = ShapeKind::Cylinder.volume(&dims);
        assert!((cone - cylinder / 3.0).abs() < 1e-9);
    }

    #[test]
    fn prism_volume_is_exact() {
        let v = ShapeKind::Prism.volume(&values(&[
            ("largo", 2.0),
            ("ancho", 3.0),
            ("altura", 4.0),
        ]));
        assert_eq!(v, 24.0);
    }

    #[test]
    fn ellipsoid_with_equal_axes_is_a_sphere() {
        let ellipsoid =
            ShapeKind::Ellipsoid.volume(&values(&[("a", 3.0), ("b", 3.0), ("c", 3.0)]));
        let sphere = ShapeKind::Sphere.volume(&values(&[("radio", 3.0)]));
        assert!((ellipsoid - sphere).abs() < 1e-9);
    }

    #[test]
    fn missing_fields_read_as_zero() {
        assert_eq!(ShapeKind::Cylinder.volume(&FieldValues::default()), 0.0);
    }
}
