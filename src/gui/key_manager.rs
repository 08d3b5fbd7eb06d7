use eframe::egui::{self, RichText, TextEdit, Vec2b};
use rust_i18n::t;
use secrecy::zeroize::Zeroize;

use crate::common::ApiKey;
use crate::config::{delete_stored_key, store_api_key};
use super::State;

/// What to do with the key typed into the window.
#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyAction {
    UseForSession,
    SaveToKeyring,
}

// shorter input is almost certainly a typo
fn entry_is_usable(entered: &str) -> bool {
    entered.trim().len() > 3
}

/// Takes the typed key out of the input buffer and makes the client use it.
/// The buffer is wiped either way.
fn apply_entered_key(state: &mut State, action: KeyAction) {
    let key = ApiKey {
        key: state.api_key_entered.trim().to_string().into(),
        is_set: true,
    };
    state.api_key_entered.zeroize();

    if action == KeyAction::SaveToKeyring {
        match store_api_key(&key) {
            Ok(()) => state.keyring_used = true,
            Err(e) => log::warn!("could not save the key: {}", e),
        }
    }
    state.client.api_key = key;
}

fn ui_key_status(ui: &mut egui::Ui, state: &mut State) {
    if state.keyring_used {
        ui.label(t!("openrouter_key_is_set"));
        if ui.button(t!("delete_openrouter_key_btn")).clicked() {
            match delete_stored_key() {
                Ok(()) => state.keyring_used = false,
                Err(e) => log::warn!("could not delete the key: {}", e),
            }
        }
    } else if state.client.api_key.is_set {
        ui.label(RichText::new(t!("key_active")).strong());
    }
}

fn ui_key_entry(ui: &mut egui::Ui, state: &mut State) -> Option<KeyAction> {
    let response = ui.add(
        TextEdit::singleline(&mut state.api_key_entered)
            .password(true)
            .desired_width(300.0)
            .horizontal_align(egui::Align::Center)
    );
    if std::mem::take(&mut state.key_focus_pending) {
        response.request_focus();
    }

    let usable = entry_is_usable(&state.api_key_entered);
    let mut action = None;
    ui.add_space(10.0);
    if ui.add_enabled(usable, egui::Button::new(t!("set_key_temporarily_btn")))
            .clicked() {
        action = Some(KeyAction::UseForSession);
    }
    ui.add_space(10.0);
    if ui.add_enabled(usable, egui::Button::new(t!("save_to_keyring_btn")))
            .clicked() {
        action = Some(KeyAction::SaveToKeyring);
    }
    action
}

pub fn ui_key_manager(ctx: &egui::Context, state: &mut State) {
    let mut open = state.show_key_manager;
    egui::Window::new(t!("api_key_manager"))
        .collapsible(false)
        .scroll(Vec2b { x: false, y: true })
        .open(&mut open)
        .default_width(420.)
        .show(ctx, |ui| {
            if state.is_modal_open {
                ui.disable();
            }
            ui.label(RichText::new(t!("openrouter_api_key")).strong());
            ui.add_space(10.0);
            ui_key_status(ui, state);
            ui.add_space(10.0);
            ui.label(t!("openrouter_key_instruction"));

            let action = ui.vertical_centered(|ui| ui_key_entry(ui, state)).inner;
            if let Some(action) = action {
                apply_entered_key(state, action);
            }
        });
    state.show_key_manager = open;
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use secrecy::ExposeSecret;
    use tokio::runtime::Runtime;

    use super::*;
    use crate::client::ProviderClient;
    use crate::config::PlannerConfig;
    use crate::gui::MyAppPermanent;

    fn state(rt: &Runtime) -> State {
        let perma = Arc::new(MyAppPermanent {
            rt: rt.handle().clone(),
            app_language: Mutex::new("en".to_string()),
        });
        let client = ProviderClient {
            config: PlannerConfig::default(),
            api_key: ApiKey::default(),
        };
        State::new(perma, client, false)
    }

    #[test]
    fn test_entry_is_usable() {
        assert!(!entry_is_usable(""));
        assert!(!entry_is_usable("  abc  "));
        assert!(entry_is_usable("sk-or-1"));
    }

    #[test]
    fn test_session_key_replaces_client_key() {
        let rt = Runtime::new().unwrap();
        let mut state = state(&rt);
        state.api_key_entered = " sk-or-secret ".to_string();

        apply_entered_key(&mut state, KeyAction::UseForSession);

        assert!(state.client.api_key.is_set);
        assert_eq!(state.client.api_key.key.expose_secret(), "sk-or-secret");
        assert!(state.api_key_entered.is_empty());
        assert!(!state.keyring_used);
    }
}
