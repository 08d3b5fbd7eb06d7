use egui::{Color32, RichText};
use rust_i18n::t;

use crate::{common::ChatRouter, gui::State, mybtn};

pub fn ui_top_panel(ctx: &egui::Context, state: &mut State) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        if state.is_modal_open {
            ui.disable();
        }
        egui::MenuBar::new().ui(ui, |ui| {
            let app_language = state.perma.app_language.lock()
                .map(|lang| lang.clone())
                .unwrap_or_else(|_| "en".to_string());
            let (lang_label, target_lang) = if app_language == "ru" {
                ("ru", "en")
            } else {
                ("en", "ru")
            };
            if ui.button(lang_label)
                .on_hover_text(egui::RichText::new(
                    "Switch Language / Переключить язык")
                    .strong()
                    .heading()
                )
                .clicked()
            {
                if let Ok(mut lang) = state.perma.app_language.lock() {
                    *lang = target_lang.to_string();
                }
                rust_i18n::set_locale(target_lang);
            }
            ui.separator();

            // API Keys Button
            let api_btn = egui::Button::new(t!("menu_api_keys_btn"))
                    .selected(state.show_key_manager);
            if ui.add(api_btn)
                .on_hover_text(
                    egui::RichText::new(t!("menu_api_keys_btn_tooltip"))
                    .strong()
                    .heading()
                )
                .clicked() {
                state.show_key_manager = !state.show_key_manager;
                state.key_focus_pending = state.show_key_manager;
            }
            if state.client.api_key.is_set {
                ui.label(RichText::new("🔑")
                .color(Color32::from_rgb(0, 220, 0)).strong());
            } else if state.client.config.router == ChatRouter::Openrouter {
                ui.colored_label(ui.visuals().error_fg_color, "🔑");
            }

            ui.colored_label(ui.visuals().code_bg_color, "|");

            if mybtn!(ui, "menu_dark_theme_btn") {
                ctx.set_theme(egui::Theme::Dark);
            }

            if mybtn!(ui, "menu_light_theme_btn") {
                ctx.set_theme(egui::Theme::Light);
            }

            ui.colored_label(ui.visuals().code_bg_color, "|");

            // which provider and model will be asked
            let provider_color = match state.client.config.router {
                ChatRouter::Openrouter => ui.visuals().hyperlink_color,
                ChatRouter::Ollama => ui.visuals().strong_text_color(),
            };
            ui.label(RichText::new(format!("{}: {}",
                    state.client.config.router, state.client.config.model))
                .color(provider_color))
                .on_hover_text(t!("provider_tooltip"));
        });
    });
}
