use glam::Vec3;

use crate::form::FormState;
use crate::mesh::{self, MeshData};
use crate::registry::ShapeKind;

/// Largest bounding dimension of the preview, in scene units.
pub const TARGET_SIZE: f32 = 3.0;

const SEGMENTS: u32 = 32;
const RINGS: u32 = 16;

/// Geometry plus the model scale the renderer applies to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewModel {
    pub mesh: MeshData,
    pub scale: Vec3,
}

/// Builds the preview for the form's current entries.
///
/// Fields that are empty, unparsable or not strictly positive fall back to
/// the shape's default dimensions, so the viewport always shows something
/// sensible while the user types.
pub fn model_for(form: &FormState) -> PreviewModel {
    let dims = effective_dimensions(form);
    let d = |index: usize| dims[index] as f32;

    let (mesh, base_scale, bounding) = match form.shape() {
        ShapeKind::Cylinder => {
            let (r, h) = (d(0), d(1));
            (
                mesh::cylinder(r, h, SEGMENTS),
                Vec3::ONE,
                Vec3::new(r * 2.0, h, r * 2.0),
            )
        }
        ShapeKind::Sphere => {
            let r = d(0);
            (mesh::sphere(r, SEGMENTS, RINGS), Vec3::ONE, Vec3::splat(r * 2.0))
        }
        ShapeKind::Cone => {
            let (r, h) = (d(0), d(1));
            (
                mesh::cone(r, h, SEGMENTS),
                Vec3::ONE,
                Vec3::new(r * 2.0, h, r * 2.0),
            )
        }
        ShapeKind::Prism => {
            let (l, a, h) = (d(0), d(1), d(2));
            (mesh::cuboid(l, h, a), Vec3::ONE, Vec3::new(l, h, a))
        }
        ShapeKind::Ellipsoid => {
            let (a, b, c) = (d(0), d(1), d(2));
            // Unit sphere; the semi-axes ride in the instance scale
            (
                mesh::sphere(1.0, SEGMENTS, RINGS),
                Vec3::new(a, b, c),
                Vec3::new(a * 2.0, b * 2.0, c * 2.0),
            )
        }
    };

    PreviewModel {
        mesh,
        scale: base_scale * fit_factor(bounding),
    }
}

/// Per-field dimensions with the fallback defaults applied.
pub fn effective_dimensions(form: &FormState) -> Vec<f64> {
    let defaults = fallback_dimensions(form.shape());
    form.inputs()
        .iter()
        .zip(defaults)
        .map(|(input, default)| match input.parsed() {
            Some(value) if value > 0.0 => value,
            _ => *default,
        })
        .collect()
}

/// Default dimensions per shape, in field declaration order.
pub fn fallback_dimensions(kind: ShapeKind) -> &'static [f64] {
    match kind {
        ShapeKind::Cylinder => &[1.0, 2.0],
        ShapeKind::Sphere => &[1.5],
        ShapeKind::Cone => &[1.0, 2.5],
        ShapeKind::Prism => &[2.0, 1.5, 2.5],
        ShapeKind::Ellipsoid => &[1.5, 1.0, 2.0],
    }
}

/// Uniform factor that fits the bounding box into [`TARGET_SIZE`].
fn fit_factor(bounding: Vec3) -> f32 {
    let max_dim = bounding.max_element();
    if max_dim > 0.0 {
        TARGET_SIZE / max_dim
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormState;

    fn form_with(shape: ShapeKind, entries: &[(&str, &str)]) -> FormState {
        let mut form = FormState::new(shape);
        for (field, value) in entries {
            assert!(form.set_raw(field, value));
        }
        form
    }

    #[test]
    fn empty_form_uses_defaults() {
        let form = FormState::new(ShapeKind::Cylinder);
        assert_eq!(effective_dimensions(&form), vec![1.0, 2.0]);
        // bounding (2, 2, 2) fits with factor 1.5
        let model = model_for(&form);
        assert_eq!(model.scale, Vec3::splat(1.5));
    }

    #[test]
    fn entered_dimensions_drive_the_fit() {
        let form = form_with(ShapeKind::Cylinder, &[("radio", "2"), ("altura", "5")]);
        let model = model_for(&form);
        assert_eq!(model.scale, Vec3::splat(0.6));
    }

    #[test]
    fn zero_and_negative_entries_fall_back() {
        let form = form_with(ShapeKind::Sphere, &[("radio", "0")]);
        assert_eq!(effective_dimensions(&form), vec![1.5]);
        let form = form_with(ShapeKind::Sphere, &[("radio", "-3")]);
        assert_eq!(effective_dimensions(&form), vec![1.5]);
        // default radius 1.5 bounds exactly to the target size
        assert_eq!(model_for(&form).scale, Vec3::ONE);
    }

    #[test]
    fn unparsable_entries_fall_back_per_field() {
        let form = form_with(
            ShapeKind::Prism,
            &[("largo", "4"), ("ancho", "x"), ("altura", "1")],
        );
        assert_eq!(effective_dimensions(&form), vec![4.0, 1.5, 1.0]);
    }

    #[test]
    fn ellipsoid_combines_axis_scale_with_the_fit() {
        let form = form_with(
            ShapeKind::Ellipsoid,
            &[("a", "1"), ("b", "2"), ("c", "3")],
        );
        let model = model_for(&form);
        // bounding (2, 4, 6) fits with factor 0.5
        assert_eq!(model.scale, Vec3::new(0.5, 1.0, 1.5));
        // geometry itself stays a unit sphere
        let max_coord = model
            .mesh
            .vertices
            .iter()
            .flat_map(|v| v.position)
            .fold(0.0f32, |acc, c| acc.max(c.abs()));
        assert!((max_coord - 1.0).abs() < 1e-4);
    }

    #[test]
    fn ellipsoid_defaults_match_the_reference_preview() {
        let form = FormState::new(ShapeKind::Ellipsoid);
        let model = model_for(&form);
        // defaults (1.5, 1, 2) bound to (3, 2, 4), factor 0.75
        assert_eq!(model.scale, Vec3::new(1.125, 0.75, 1.5));
    }

    #[test]
    fn prism_maps_fields_to_axes() {
        let form = form_with(
            ShapeKind::Prism,
            &[("largo", "4"), ("ancho", "2"), ("altura", "1")],
        );
        let model = model_for(&form);
        assert_eq!(model.scale, Vec3::splat(0.75));
        let (mut max_x, mut max_y, mut max_z) = (0.0f32, 0.0f32, 0.0f32);
        for vertex in &model.mesh.vertices {
            max_x = max_x.max(vertex.position[0].abs());
            max_y = max_y.max(vertex.position[1].abs());
            max_z = max_z.max(vertex.position[2].abs());
        }
        // largo → x, altura → y, ancho → z
        assert_eq!([max_x, max_y, max_z], [2.0, 0.5, 1.0]);
    }
}
