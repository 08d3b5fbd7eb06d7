use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId, Margin, RichText, Stroke};
use rust_i18n::t;

use crate::format::{Period, Run, RunStyle};
use crate::gui::State;
use crate::gui::view::Output;

const TITLE_COLOR: Color32 = Color32::from_rgb(0x00, 0x47, 0xAB);
const DAY_COLOR: Color32 = Color32::from_rgb(0x22, 0x8B, 0x22);
const MORNING_COLOR: Color32 = Color32::from_rgb(0xFF, 0x45, 0x00);
const AFTERNOON_COLOR: Color32 = Color32::from_rgb(0xD2, 0x69, 0x1E);
const EVENING_COLOR: Color32 = Color32::from_rgb(0x80, 0x00, 0x80);
const LOADING_COLOR: Color32 = Color32::from_rgb(0x77, 0x77, 0x77);

const BODY_SIZE: f32 = 14.0;

pub fn ui_itinerary(ctx: &egui::Context, state: &mut State) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if state.is_modal_open {
            ui.disable();
        }

        if let Some(text) = state.view.plain_text() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(t!("copy_btn")).on_hover_text(t!("copy_btn_tooltip"))
                        .clicked() {
                    ctx.copy_text(text);
                }
            });
        }

        egui::ScrollArea::vertical()
            .id_salt("itinerary_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if matches!(state.view.output(), Output::Empty) {
                    render_welcome(ui);
                    return;
                }
                let text_color = ui.visuals().text_color();
                let mut job = layout_runs(&state.view.runs(), text_color);
                job.wrap.max_width = ui.available_width();
                ui.add(egui::Label::new(job).selectable(true));
            });
    });
}

fn render_welcome(ui: &mut egui::Ui) {
    egui::Frame::default()
        .stroke(Stroke {
            width: 1.0,
            color: ui.visuals().hyperlink_color,
        })
        .outer_margin(Margin::symmetric(5, 0))
        .inner_margin(10.0)
        .corner_radius(5.0)
        .fill(ui.visuals().faint_bg_color)
        .show(ui, |ui| {
            ui.heading(t!("welcome"));
            ui.label(RichText::new(t!("welcome_hint")).weak());
        });
}

// egui has no bold face by default, so emphasis comes from size and color
fn run_format(style: RunStyle, text_color: Color32) -> TextFormat {
    let (size, color, italics) = match style {
        RunStyle::Title => (20.0, TITLE_COLOR, false),
        RunStyle::DayHeader => (17.0, DAY_COLOR, false),
        RunStyle::Period(Period::Morning) => (BODY_SIZE, MORNING_COLOR, false),
        RunStyle::Period(Period::Afternoon) => (BODY_SIZE, AFTERNOON_COLOR, false),
        RunStyle::Period(Period::Evening) => (BODY_SIZE, EVENING_COLOR, false),
        RunStyle::Loading => (BODY_SIZE, LOADING_COLOR, true),
        RunStyle::Plain => (BODY_SIZE, text_color, false),
    };
    TextFormat {
        font_id: FontId::proportional(size),
        color,
        italics,
        ..Default::default()
    }
}

fn layout_runs(runs: &[Run<'_>], text_color: Color32) -> LayoutJob {
    let mut job = LayoutJob::default();
    for run in runs {
        job.append(&run.text, 0.0, run_format(run.style, text_color));
    }
    job
}
