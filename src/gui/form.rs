use egui::{Key, Modifiers, RichText, TextEdit};
use rust_i18n::t;

use crate::gui::State;

pub fn ui_form(ctx: &egui::Context, state: &mut State) {
    egui::TopBottomPanel::top("trip_form_panel").show(ctx, |ui| {
        if state.is_modal_open {
            ui.disable();
        }

        ui.add_space(6.0);
        egui::Grid::new("trip_form_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label(RichText::new(t!("city_label")).strong());
                ui.add(TextEdit::singleline(&mut state.form.city)
                    .desired_width(300.0)
                    .hint_text(t!("city_hint")));
                ui.end_row();

                ui.label(RichText::new(t!("days_label")).strong());
                ui.add(TextEdit::singleline(&mut state.form.days)
                    .desired_width(300.0)
                    .hint_text("3"));
                ui.end_row();

                ui.label(RichText::new(t!("interests_label")).strong());
                ui.add(TextEdit::singleline(&mut state.form.interests)
                    .desired_width(300.0)
                    .hint_text(t!("interests_hint")));
                ui.end_row();
            });
        ui.add_space(6.0);

        let mut do_generate_now = false;

        // Check for Ctrl+Enter
        if ui.input_mut(|i| i.consume_key(Modifiers::CTRL, Key::Enter)) {
            do_generate_now = true;
        }

        ui.vertical_centered(|ui| {
            let enabled = state.view.can_generate();
            if ui.add_enabled(enabled,
                    egui::Button::new(RichText::new(t!("generate_btn")).strong()))
                .on_hover_text(t!("generate_btn_tooltip"))
                .clicked() {
                do_generate_now = true;
            }
        });
        ui.add_space(6.0);

        if do_generate_now && state.view.can_generate() {
            state.submit(ctx);
        }
    });
}
