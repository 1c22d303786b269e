use std::time::Instant;

use crate::controller::Controller;

/// Controls panel below the board: interval entry, Run/Stop, Random, Clear
/// and the population readout.
///
/// Returns `true` when the board changed and needs a redraw.
pub fn controls(ctx: &egui::Context, controller: &mut Controller) -> bool {
    let mut board_changed = false;

    egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            ui.label("Update every");
            let mut interval_text = controller.interval_text().to_owned();
            let response = ui.add(egui::TextEdit::singleline(&mut interval_text).desired_width(60.0));
            if response.changed() {
                // Rejections are kept on the controller and shown below.
                controller.set_interval(&interval_text, Instant::now()).ok();
            }
            ui.label("msec");

            let running = controller.is_running();
            if ui.button(if running { "Stop" } else { "Run" }).clicked() {
                controller.set_running(!running, Instant::now());
            }

            if ui.add_enabled(!running, egui::Button::new("Random")).clicked() {
                board_changed |= controller.randomize();
            }
            if ui.add_enabled(!running, egui::Button::new("Clear")).clicked() {
                board_changed |= controller.clear();
            }

            ui.separator();
            let store = controller.store();
            ui.label(format!("Generation: {}", store.generation()));
            ui.label(format!("Live cells: {}", store.alive().len()));

            if let Some(error) = controller.interval_error() {
                ui.separator();
                ui.colored_label(
                    egui::Color32::from_rgb(220, 80, 80),
                    format!("{error} (using {} ms)", controller.interval().as_millis()),
                );
            }
        });
    });

    board_changed
}
