mod components;

use components::{handlers, header, preview_area, results, upload_section, utils};
use gloo_events::EventListener;
use gloo_file::File as GlooFile;
use pipeline::{
    HttpServiceClient, Image, ImageSource, Orchestrator, PipelineOutcome, Presentation, RunId, ServiceEndpoints, Stage,
};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // Image selection
    FileChosen(Option<GlooFile>, Option<String>),
    ImageLoaded(u64, Result<Image, String>),

    // Pipeline
    Submit,
    StageStarted(RunId, Stage),
    Settled(RunId, PipelineOutcome),

    // Popups
    DismissCelebration,
    OpenImageDetail,
    CloseImageDetail,

    // UI states
    SetError(Option<String>),
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
pub struct Model {
    pub image_source: ImageSource,
    pub orchestrator: Orchestrator,
    pub presentation: Presentation,
    pub services: Option<Rc<HttpServiceClient>>,
    pub error: Option<String>,
    pub is_dragging: bool,
    pub image_loading: bool,
    pub image_detail_url: Option<String>,
    pub load_generation: u64,
    pub load_notice: Option<String>,
    paste_listener: Option<EventListener>,
}

fn service_endpoints() -> ServiceEndpoints {
    match option_env!("PACKAGE_API_URL") {
        Some(base) => ServiceEndpoints::with_base(base).unwrap_or_else(|e| {
            log::error!("Invalid PACKAGE_API_URL {}: {}", base, e);
            ServiceEndpoints::default()
        }),
        None => ServiceEndpoints::default(),
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut error = None;
        let services = match HttpServiceClient::new(service_endpoints()) {
            Ok(client) => Some(Rc::new(client)),
            Err(e) => {
                log::error!("Failed to build service client: {}", e);
                error = Some(e.to_string());
                None
            }
        };

        let mut model = Self {
            image_source: ImageSource::new(),
            orchestrator: Orchestrator::new(),
            presentation: Presentation::default(),
            services,
            error,
            is_dragging: false,
            image_loading: false,
            image_detail_url: None,
            load_generation: 0,
            load_notice: None,
            paste_listener: None,
        };

        if let Some(window) = web_sys::window() {
            let link = ctx.link().clone();
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        }

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Image selection
            Msg::FileChosen(file, notice) => handlers::handle_file_chosen(self, ctx, file, notice),
            Msg::ImageLoaded(generation, result) => handlers::handle_image_loaded(self, generation, result),

            // Pipeline
            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::StageStarted(run, stage) => handlers::handle_stage_started(self, run, stage),
            Msg::Settled(run, outcome) => handlers::handle_settled(self, run, outcome),

            // Popups
            Msg::DismissCelebration => {
                self.presentation.dismiss_celebration();
                true
            }
            Msg::OpenImageDetail => handlers::handle_open_image_detail(self),
            Msg::CloseImageDetail => {
                self.presentation.close_image_detail();
                self.image_detail_url = None;
                true
            }

            // UI states
            Msg::SetError(error) => {
                self.error = error;
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { header::render_header() }

                <main class="main-content">
                { upload_section::render_upload_section(self, ctx) }
                { preview_area::render_preview_area(self) }
                { utils::render_error_message(self) }
                { results::render_results(self, ctx) }
                </main>

                { results::render_celebration(self, ctx) }
                { results::render_image_detail(self, ctx) }

                <footer class="app-footer">
                    <p>{"Package AI | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
