//! The surface material parameters are edited through.
//!
//! Materials describe their editable fields against [`ParameterEditor`]; the
//! immediate-mode UI drawing them is provided by the host. With the `egui`
//! feature enabled, `egui::Ui` implements it directly.

use crate::color::Color;
use glamx::Vec3;

/// An immediate-mode parameter editing surface.
///
/// Every method edits the value in place and returns `true` if the user changed it
/// this frame.
pub trait ParameterEditor {
    /// Edits the RGB components of a color. Alpha is left untouched.
    fn edit_color(&mut self, label: &str, color: &mut Color) -> bool;

    /// Edits a three-component vector.
    fn edit_vec3(&mut self, label: &str, value: &mut Vec3) -> bool;

    /// Edits a boolean flag.
    fn edit_bool(&mut self, label: &str, value: &mut bool) -> bool;

    /// Selects one of `options` by index.
    fn edit_choice(&mut self, label: &str, selected: &mut usize, options: &[&str]) -> bool;

    /// Groups the fields added by `add_contents` under a collapsible section.
    fn section(&mut self, label: &str, add_contents: &mut dyn FnMut(&mut dyn ParameterEditor));
}

#[cfg(feature = "egui")]
impl ParameterEditor for egui::Ui {
    fn edit_color(&mut self, label: &str, color: &mut Color) -> bool {
        let mut rgb = [color.r, color.g, color.b];
        let changed = self
            .horizontal(|ui| {
                let changed = ui.color_edit_button_rgb(&mut rgb).changed();
                let _ = ui.label(label);
                changed
            })
            .inner;

        if changed {
            color.r = rgb[0];
            color.g = rgb[1];
            color.b = rgb[2];
        }

        changed
    }

    fn edit_vec3(&mut self, label: &str, value: &mut Vec3) -> bool {
        self.horizontal(|ui| {
            let mut changed = false;
            changed |= ui.add(egui::DragValue::new(&mut value.x).speed(0.1)).changed();
            changed |= ui.add(egui::DragValue::new(&mut value.y).speed(0.1)).changed();
            changed |= ui.add(egui::DragValue::new(&mut value.z).speed(0.1)).changed();
            let _ = ui.label(label);
            changed
        })
        .inner
    }

    fn edit_bool(&mut self, label: &str, value: &mut bool) -> bool {
        self.checkbox(value, label).changed()
    }

    fn edit_choice(&mut self, label: &str, selected: &mut usize, options: &[&str]) -> bool {
        let before = *selected;
        let current = options.get(before).copied().unwrap_or_default();

        let _ = egui::ComboBox::from_label(label)
            .selected_text(current)
            .show_ui(self, |ui| {
                for (index, option) in options.iter().enumerate() {
                    let _ = ui.selectable_value(&mut *selected, index, *option);
                }
            });

        *selected != before
    }

    fn section(&mut self, label: &str, add_contents: &mut dyn FnMut(&mut dyn ParameterEditor)) {
        let _ = egui::CollapsingHeader::new(label).show(self, |ui| add_contents(ui));
    }
}
