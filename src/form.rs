use serde::Serialize;

use crate::format;
use crate::registry::{FieldSpec, FieldValues, ShapeDefinition, ShapeKind};

/// Raw text entered for one field of the active shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInput {
    spec: &'static FieldSpec,
    pub raw: String,
}

impl FieldInput {
    fn new(spec: &'static FieldSpec) -> Self {
        Self {
            spec,
            raw: String::new(),
        }
    }

    pub fn spec(&self) -> &'static FieldSpec {
        self.spec
    }

    pub fn id(&self) -> &'static str {
        self.spec.id
    }

    pub fn label(&self) -> &'static str {
        self.spec.label
    }

    /// Parsed value when the entry is a non-negative number.
    ///
    /// NaN fails the comparison, so "NaN" is rejected just like any other
    /// unparsable entry.
    pub fn parsed(&self) -> Option<f64> {
        let value = self.raw.trim().parse::<f64>().ok()?;
        (value >= 0.0).then_some(value)
    }
}

/// Mutable state of the input form: the active shape and one raw entry per
/// field, in the field declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    shape: ShapeKind,
    inputs: Vec<FieldInput>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(ShapeKind::Cylinder)
    }
}

impl FormState {
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            shape,
            inputs: shape.fields().iter().map(FieldInput::new).collect(),
        }
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn definition(&self) -> &'static ShapeDefinition {
        self.shape.definition()
    }

    /// Switches the active shape, discarding all previous entries.
    pub fn select(&mut self, shape: ShapeKind) {
        *self = Self::new(shape);
    }

    pub fn inputs(&self) -> &[FieldInput] {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut [FieldInput] {
        &mut self.inputs
    }

    /// Sets the raw text of a field. Returns false when the field does not
    /// belong to the active shape.
    pub fn set_raw(&mut self, field_id: &str, value: &str) -> bool {
        match self.inputs.iter_mut().find(|input| input.id() == field_id) {
            Some(input) => {
                input.raw = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Validates every field and computes the volume when all of them pass.
    ///
    /// Invalid labels are collected in field order; a single invalid field
    /// suppresses the computation entirely.
    pub fn compute(&self) -> Computation {
        let mut values = FieldValues::default();
        let mut invalid = Vec::new();
        for input in &self.inputs {
            match input.parsed() {
                Some(value) => values.insert(input.id(), value),
                None => invalid.push(input.label()),
            }
        }
        if !invalid.is_empty() {
            return Computation::Invalid { labels: invalid };
        }
        let raw = self.shape.volume(&values);
        let rounded = format::round_volume(raw);
        Computation::Volume {
            raw,
            rounded,
            display: format::es_mx(rounded),
        }
    }
}

/// Outcome of a compute request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Computation {
    Volume {
        raw: f64,
        rounded: f64,
        display: String,
    },
    Invalid {
        labels: Vec<&'static str>,
    },
}

impl Computation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Computation::Volume { .. })
    }

    /// `Volumen: {valor} unidades³`, with a dash placeholder on failure.
    pub fn result_line(&self) -> String {
        match self {
            Computation::Volume { display, .. } => format::volume_line(display),
            Computation::Invalid { .. } => format::volume_line(format::RESULT_PLACEHOLDER),
        }
    }

    /// `Revisa estos campos: …` when validation failed.
    pub fn error_line(&self) -> Option<String> {
        match self {
            Computation::Volume { .. } => None,
            Computation::Invalid { labels } => Some(format::review_line(labels)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(shape: ShapeKind, entries: &[(&str, &str)]) -> FormState {
        let mut form = FormState::new(shape);
        for (field, value) in entries {
            assert!(form.set_raw(field, value), "unknown field {field}");
        }
        form
    }

    #[test]
    fn new_form_exposes_fields_in_declared_order() {
        let form = FormState::new(ShapeKind::Cylinder);
        let ids: Vec<&str> = form.inputs().iter().map(|input| input.id()).collect();
        assert_eq!(ids, ["radio", "altura"]);
        assert!(form.inputs().iter().all(|input| input.raw.is_empty()));
    }

    #[test]
    fn select_rebuilds_inputs_and_discards_entries() {
        let mut form = form_with(ShapeKind::Cylinder, &[("radio", "2"), ("altura", "5")]);
        form.select(ShapeKind::Ellipsoid);
        let ids: Vec<&str> = form.inputs().iter().map(|input| input.id()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(form.inputs().iter().all(|input| input.raw.is_empty()));
    }

    #[test]
    fn set_raw_rejects_foreign_fields() {
        let mut form = FormState::new(ShapeKind::Sphere);
        assert!(form.set_raw("radio", "3"));
        assert!(!form.set_raw("altura", "3"));
    }

    #[test]
    fn computes_cylinder_volume() {
        let form = form_with(ShapeKind::Cylinder, &[("radio", "2"), ("altura", "5")]);
        match form.compute() {
            Computation::Volume {
                rounded, display, ..
            } => {
                assert_eq!(rounded, 62.832);
                assert_eq!(display, "62.832");
            }
            other => panic!("expected a volume, got {other:?}"),
        }
    }

    #[test]
    fn computes_sphere_volume() {
        let form = form_with(ShapeKind::Sphere, &[("radio", "3")]);
        assert_eq!(
            form.compute().result_line(),
            "Volumen: 113.097 unidades³"
        );
    }

    #[test]
    fn prism_keeps_trailing_zeros() {
        let form = form_with(
            ShapeKind::Prism,
            &[("largo", "2"), ("ancho", "3"), ("altura", "4")],
        );
        assert_eq!(form.compute().result_line(), "Volumen: 24.000 unidades³");
    }

    #[test]
    fn non_numeric_entry_fails_with_its_label() {
        let form = form_with(ShapeKind::Cone, &[("radio", "abc"), ("altura", "5")]);
        let outcome = form.compute();
        assert_eq!(
            outcome,
            Computation::Invalid {
                labels: vec!["Radio (r)"],
            }
        );
        assert_eq!(
            outcome.error_line().unwrap(),
            "Revisa estos campos: Radio (r)."
        );
        assert_eq!(outcome.result_line(), "Volumen: — unidades³");
    }

    #[test]
    fn negative_entry_fails_with_its_label() {
        let form = form_with(
            ShapeKind::Ellipsoid,
            &[("a", "1"), ("b", "-2"), ("c", "3")],
        );
        assert_eq!(
            form.compute().error_line().unwrap(),
            "Revisa estos campos: Semieje (b)."
        );
    }

    #[test]
    fn empty_fields_are_reported_in_order() {
        let form = FormState::new(ShapeKind::Cylinder);
        assert_eq!(
            form.compute(),
            Computation::Invalid {
                labels: vec!["Radio (r)", "Altura (h)"],
            }
        );
    }

    #[test]
    fn zero_is_a_valid_entry() {
        let form = form_with(ShapeKind::Sphere, &[("radio", "0")]);
        assert_eq!(form.compute().result_line(), "Volumen: 0.000 unidades³");
    }

    #[test]
    fn nan_entry_is_rejected() {
        let form = form_with(ShapeKind::Sphere, &[("radio", "NaN")]);
        assert!(!form.compute().is_valid());
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let form = form_with(ShapeKind::Sphere, &[("radio", "  3.0  ")]);
        assert!(form.compute().is_valid());
    }

    #[test]
    fn compute_is_idempotent() {
        let form = form_with(ShapeKind::Cylinder, &[("radio", "2"), ("altura", "5")]);
        assert_eq!(form.compute(), form.compute());
    }
}
