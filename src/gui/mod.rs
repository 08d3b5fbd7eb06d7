use std::any::Any;
use std::sync::{Arc, Mutex};
use std::sync::mpsc::{Receiver, Sender, channel};

use eframe::egui;
use tokio::runtime::Handle;
use tokio::task::{AbortHandle, JoinHandle};

use crate::client::{ProviderClient, TextGenerator, WARNING_PREFIX, plan_trip};
use crate::common::{TripForm, TripRequest};
use crate::format::{Formatter, Segment};
use crate::gui::form::ui_form;
use crate::gui::itinerary::ui_itinerary;
use crate::gui::key_manager::ui_key_manager;
use crate::gui::top_panel::ui_top_panel;
use crate::gui::view::PlannerView;

mod form;
mod itinerary;
mod key_manager;
mod top_panel;
pub mod view;

pub struct MyAppPermanent {
    pub rt: Handle,
    pub app_language: Mutex<String>,
}

// sent from the worker task back to the UI thread
pub enum PlannerEvent {
    Finished(Vec<Segment>),
}

/// A running generation task. There is no cancel control in the window yet,
/// but the task can be stopped through this handle.
///
/// Generation runs in its own task so that a panic inside a provider crate
/// still ends with a `Finished` event and the view can take new requests.
pub struct RequestHandle {
    task: JoinHandle<()>,
    work: AbortHandle,
}

impl RequestHandle {
    pub fn spawn<G>(
        rt: &Handle,
        generator: G,
        formatter: Arc<Formatter>,
        request: TripRequest,
        tx: Sender<PlannerEvent>,
        ctx: egui::Context,
    ) -> Self
    where
        G: TextGenerator + Send + Sync + 'static,
    {
        let work = {
            let formatter = formatter.clone();
            let request = request.clone();
            rt.spawn(async move {
                plan_trip(&generator, &request, &formatter).await
            })
        };
        let abort = work.abort_handle();

        let task = rt.spawn(async move {
            let segments = match work.await {
                Ok(segments) => segments,
                Err(e) if e.is_panic() => {
                    log::error!("generation task panicked for {}", request.city());
                    let text = format!("{} Error generating itinerary: {}",
                        WARNING_PREFIX, panic_message(e.into_panic()));
                    formatter.format(&text, &request).collect()
                }
                // aborted through `cancel`, nobody is waiting for a result
                Err(_) => return,
            };
            log::info!("itinerary for {} ready ({} segments)",
                request.city(), segments.len());
            let _ = tx.send(PlannerEvent::Finished(segments));
            ctx.request_repaint();
        });
        Self { task, work: abort }
    }

    pub fn cancel(&self) {
        self.work.abort();
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "the generation task stopped unexpectedly".to_string()
    }
}

pub struct State {
    perma: Arc<MyAppPermanent>,
    form: TripForm,
    view: PlannerView,
    client: ProviderClient,
    formatter: Arc<Formatter>,
    request: Option<RequestHandle>,
    tx: Sender<PlannerEvent>,
    rx: Receiver<PlannerEvent>,
    show_key_manager: bool,
    // focus the key input once, when the window opens
    key_focus_pending: bool,
    api_key_entered: String,
    keyring_used: bool,
    // error modal's content:
    error_msg: Option<String>,
    is_modal_open: bool,
}

impl State {
    pub fn new(
        permanent: Arc<MyAppPermanent>,
        client: ProviderClient,
        keyring_used: bool,
    ) -> Self {
        let (tx, rx) = channel();
        Self {
            perma: permanent,
            form: TripForm::default(),
            view: PlannerView::default(),
            client,
            formatter: Arc::new(Formatter::default()),
            request: None,
            tx,
            rx,
            show_key_manager: false,
            key_focus_pending: false,
            api_key_entered: String::new(),
            keyring_used,
            error_msg: None, // if there is an error, modal will auto open
            is_modal_open: false,
        }
    }

    /// Validates the form and starts one generation task.
    pub fn submit(&mut self, ctx: &egui::Context) {
        let request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => {
                log::info!("rejected input: {}", e);
                self.error_msg = Some(rust_i18n::t!("input_error_msg").to_string());
                self.is_modal_open = true;
                return;
            }
        };

        if !self.view.begin_request() {
            return;
        }

        log::info!("planning {} days in {}", request.days(), request.city());
        self.request = Some(RequestHandle::spawn(
            &self.perma.rt,
            self.client.clone(),
            self.formatter.clone(),
            request,
            self.tx.clone(),
            ctx.clone(),
        ));
    }
}

pub struct MyApp {
    state: State,
}

impl MyApp {
    pub fn new(permanent: MyAppPermanent, client: ProviderClient,
            keyring_used: bool) -> Self {
        Self {
            state: State::new(Arc::new(permanent), client, keyring_used),
        }
    }
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = &mut self.state;

        if state.error_msg.is_some() {
            state.is_modal_open = true;
        }

        while let Ok(event) = state.rx.try_recv() {
            match event {
                PlannerEvent::Finished(segments) => {
                    state.view.complete_request(segments);
                    state.request = None;
                }
            }
        }

        ui_top_panel(ctx, state);

        ui_key_manager(ctx, state);

        ui_form(ctx, state);

        ui_itinerary(ctx, state);

        if let Some(msg) = &state.error_msg {
            // We clone the message to avoid borrowing issues inside the closure
            let msg_text = msg.clone();
            let mut open = true;

            egui::Window::new(rust_i18n::t!("input_error_title"))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.set_min_width(300.0);

                    ui.vertical_centered(|ui| {
                        ui.add_space(10.0);
                        ui.label(&msg_text);
                        ui.add_space(20.0);

                        if ui.button("OK").clicked() {
                            state.error_msg = None;
                            state.is_modal_open = false;
                        }
                    });
                });

            // Handle the "X" button on the window frame
            if !open {
                state.error_msg = None;
                state.is_modal_open = false;
            }
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(request) = self.state.request.take() {
            if !request.is_finished() {
                log::info!("cancelling the running request");
                request.cancel();
            }
        }
    }
}

#[macro_export]
macro_rules! mybtn {
    // Matches: mybtn!(ui, "label_key") and shows "label_key_tooltip" on hover
    ($ui:expr, $key:literal) => {
        $ui.button(rust_i18n::t!($key))
            .on_hover_text(
                ::egui::RichText::new(
                    rust_i18n::t!(concat!($key, "_tooltip"))
                )
                .strong()
                .heading()
            )
            .clicked()
    };
}
