#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::io::Write;

use clap::Parser;
use dotenv::dotenv;
use egui::ViewportBuilder;
use tokio::runtime::Runtime;

use crate::client::{ProviderClient, TextGenerator, plan_trip};
use crate::common::TripForm;
use crate::config::{ConfigError, ConfigFlags, PlannerConfig, load_api_key};
use crate::format::{Formatter, Markers, render_plain};
use crate::gui::MyAppPermanent;

rust_i18n::i18n!("locales");

mod client;
mod common;
mod config;
mod format;
mod gui;
mod ollama;
mod openr;
mod planner;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Application theme ("light" or "dark")
    #[arg(long)]
    theme: Option<String>,
    /// Interface language ("en" or "ru")
    #[arg(long)]
    la: Option<String>,
    /// Provider to ask: "openrouter" or "ollama"
    #[arg(long)]
    router: Option<String>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    temperature: Option<f64>,
    #[arg(long)]
    seed: Option<i32>,
    /// Plan without opening a window; the itinerary goes to stdout
    #[arg(long)]
    city: Option<String>,
    #[arg(long, default_value = "1")]
    days: String,
    #[arg(long, default_value = "")]
    interests: String,
    /// Print the segments as JSON instead of text (headless only)
    #[arg(long)]
    json: bool,
}

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    dotenv().ok();

    let args = Args::parse();

    let config = match config_or_exit(PlannerConfig::from_env(ConfigFlags {
        router: args.router.clone(),
        model: args.model.clone(),
        temperature: args.temperature,
        seed: args.seed,
    }), &mut std::io::stderr()) {
        Ok(config) => config,
        Err(code) => std::process::exit(code),
    };
    log::info!("provider: {} model: {}", config.router, config.model);

    let (api_key, keyring_used) = load_api_key();
    let client = ProviderClient { config, api_key };

    // create the tokio runtime
    let rt = Runtime::new().expect("Unable to create Runtime");

    if let Some(city) = args.city.clone() {
        let form = TripForm {
            city,
            days: args.days.clone(),
            interests: args.interests.clone(),
        };
        std::process::exit(run_headless(&rt, &client, form, args.json,
            &mut std::io::stdout().lock(), &mut std::io::stderr()));
    }

    // enter the runtime context
    // this variable must live as long as the app runs!
    let _enter = rt.enter();

    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("🌍 AI Travel Planner")
            .with_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    let rt_handle = rt.handle().clone();

    eframe::run_native(
        "itinera",
        native_options,
        Box::new(move |cc| {
            let mut app_language = "en".to_string();
            if let Some(la) = args.la {
                match la.as_str() {
                    "ru" | "en" => app_language = la,
                    _ => {
                        log::warn!("Unsupported language '{}'. \
                            Supported: 'en', 'ru'.", la);
                    }
                }
            }
            rust_i18n::set_locale(&app_language);

            if let Some(theme) = args.theme {
                if theme == "light" {
                    cc.egui_ctx.set_theme(egui::Theme::Light);
                } else if theme == "dark" {
                    cc.egui_ctx.set_theme(egui::Theme::Dark);
                }
            }

            Ok(Box::new(gui::MyApp::new(MyAppPermanent {
                rt: rt_handle,
                app_language: std::sync::Mutex::new(app_language),
            }, client, keyring_used)))
        }),
    )
}

/// Reports a bad configuration on `err` and picks exit code 2 for it.
fn config_or_exit(result: Result<PlannerConfig, ConfigError>,
        err: &mut impl Write) -> Result<PlannerConfig, i32> {
    result.map_err(|e| {
        let _ = writeln!(err, "Error: {}", e);
        2
    })
}

// returns the process exit code
fn run_headless<G: TextGenerator>(
    rt: &Runtime,
    generator: &G,
    form: TripForm,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> i32 {
    let request = match form.validate() {
        Ok(request) => request,
        Err(e) => {
            let _ = writeln!(err, "Input Error: {}", e);
            return 2;
        }
    };

    let formatter = Formatter::new(Markers::default());
    let segments = rt.block_on(plan_trip(generator, &request, &formatter));

    let written = if json {
        match serde_json::to_string_pretty(&segments) {
            Ok(s) => writeln!(out, "{}", s),
            Err(e) => {
                let _ = writeln!(err, "Error serializing itinerary: {}", e);
                return 1;
            }
        }
    } else {
        write!(out, "{}", render_plain(&segments))
    };

    match written.and_then(|_| out.flush()) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "Error writing itinerary: {}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::GenError;
    use crate::common::TripRequest;

    struct Canned(&'static str);

    impl TextGenerator for Canned {
        async fn complete(&self, _prompt: &str) -> Result<String, GenError> {
            Ok(self.0.to_string())
        }
    }

    fn form(city: &str, days: &str) -> TripForm {
        TripForm {
            city: city.to_string(),
            days: days.to_string(),
            interests: "food".to_string(),
        }
    }

    fn headless(form: TripForm, json: bool) -> (i32, String, String) {
        let rt = Runtime::new().unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = run_headless(&rt, &Canned("📅 Day 1\n🌅 Morning: Museum"),
            form, json, &mut out, &mut err);
        (code, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_invalid_days_exit_code() {
        let (code, out, err) = headless(form("Rome", "zero"), false);
        assert_eq!(code, 2);
        assert!(out.is_empty());
        assert!(err.starts_with("Input Error:"));

        let (code, _, _) = headless(form("  ", "2"), false);
        assert_eq!(code, 2);
    }

    #[test]
    fn test_text_output() {
        let (code, out, err) = headless(form("Rome", "1"), false);
        assert_eq!(code, 0);
        assert!(err.is_empty());

        let request = TripRequest::new("Rome", 1, vec!["food".to_string()]).unwrap();
        let expected: Vec<_> = Formatter::default()
            .format("📅 Day 1\n🌅 Morning: Museum", &request)
            .collect();
        assert_eq!(out, render_plain(&expected));
        assert!(out.starts_with("🌍 1-Day Travel Plan for Rome 🌍\n"));
    }

    #[test]
    fn test_json_output() {
        let (code, out, _) = headless(form("Rome", "1"), true);
        assert_eq!(code, 0);

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let segments = value.as_array().unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0]["kind"], "Title");
        assert_eq!(segments[1]["kind"], "DayHeader");
        assert_eq!(segments[2]["body"], "Museum");
    }

    #[test]
    fn test_bad_config_exit_code() {
        let flags = ConfigFlags {
            router: Some("gemini".to_string()),
            ..Default::default()
        };
        let mut err = Vec::new();
        let result = config_or_exit(
            PlannerConfig::resolve(flags, |_: &str| None), &mut err);

        assert_eq!(result, Err(2));
        assert!(String::from_utf8(err).unwrap()
            .starts_with("Error: Unknown router 'gemini'"));
    }
}
