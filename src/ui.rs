use egui::{Color32, RichText};

use crate::app::ViewerState;
use crate::registry::ShapeKind;

const PANEL_WIDTH: f32 = 300.0;
const CHIP_BASE: Color32 = Color32::from_rgb(0x1e, 0x29, 0x3b);
const CHIP_FLASH: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);
const ERROR_COLOR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71);

/// Builds the control panel: shape selector, dimension fields, formula,
/// compute button and result lines.
pub fn panel(ctx: &egui::Context, viewer: &mut ViewerState) {
    egui::SidePanel::left("controls")
        .resizable(false)
        .exact_width(PANEL_WIDTH)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("Calculadora de volúmenes");
            ui.add_space(4.0);

            let chip = mix(CHIP_BASE, CHIP_FLASH, viewer.flash());
            ui.label(
                RichText::new(viewer.form.shape().display_name())
                    .background_color(chip)
                    .color(Color32::WHITE)
                    .strong(),
            );
            ui.add_space(8.0);

            let mut selected = viewer.form.shape();
            egui::ComboBox::from_label("Figura")
                .selected_text(selected.display_name())
                .show_ui(ui, |ui| {
                    for kind in ShapeKind::ALL {
                        ui.selectable_value(&mut selected, kind, kind.display_name());
                    }
                });
            if selected != viewer.form.shape() {
                viewer.select_shape(selected);
            }

            ui.add_space(8.0);
            for input in viewer.form.inputs_mut() {
                ui.label(input.label());
                // field ids repeat across shapes, scope the widget id
                ui.push_id(input.id(), |ui| {
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut input.raw);
                        ui.weak(input.spec().hint);
                    });
                });
                ui.add_space(4.0);
            }

            ui.label(
                RichText::new(format!("Fórmula: {}", viewer.form.shape().formula())).italics(),
            );
            ui.add_space(8.0);

            if ui.button("Calcular").clicked() {
                viewer.compute();
            }

            ui.add_space(8.0);
            ui.label(RichText::new(viewer.result_line()).strong());
            if let Some(error) = viewer.error_line() {
                ui.colored_label(ERROR_COLOR, error);
            }
        });
}

/// Linear blend between the resting chip color and the highlight.
fn mix(base: Color32, flash: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color32::from_rgb(
        channel(base.r(), flash.r()),
        channel(base.g(), flash.g()),
        channel(base.b(), flash.b()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_endpoints_return_the_inputs() {
        assert_eq!(mix(CHIP_BASE, CHIP_FLASH, 0.0), CHIP_BASE);
        assert_eq!(mix(CHIP_BASE, CHIP_FLASH, 1.0), CHIP_FLASH);
    }

    #[test]
    fn mix_clamps_out_of_range_factors() {
        assert_eq!(mix(CHIP_BASE, CHIP_FLASH, -2.0), CHIP_BASE);
        assert_eq!(mix(CHIP_BASE, CHIP_FLASH, 2.0), CHIP_FLASH);
    }

    #[test]
    fn mix_midpoint_lands_between_the_endpoints() {
        let mid = mix(Color32::from_rgb(0, 0, 0), Color32::from_rgb(200, 100, 50), 0.5);
        assert_eq!(mid, Color32::from_rgb(100, 50, 25));
    }
}
