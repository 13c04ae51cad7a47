use super::super::{Model, Msg};
use super::utils::{skipped_notice, split_image_files};
use gloo_file::File as GlooFile;
use pipeline::{execute, Image, PipelineOutcome, Presentation, RunId, Stage};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

fn refresh_presentation(model: &mut Model) {
    model.presentation = Presentation::from_state(model.orchestrator.state());
    model.image_detail_url = None;
}

/// `notice` is shown once the chosen file has loaded, in place of any older error.
pub fn handle_file_chosen(model: &mut Model, ctx: &Context<Model>, file: Option<GlooFile>, notice: Option<String>) -> bool {
    model.load_generation += 1;
    model.load_notice = notice;

    let Some(file) = file else {
        if let Err(e) = model.image_source.select(None) {
            model.error = Some(e.to_string());
        }
        return true;
    };

    model.error = None;
    model.image_loading = true;
    let generation = model.load_generation;
    let link = ctx.link().clone();

    spawn_local(async move {
        let result = gloo_file::futures::read_as_bytes(&file)
            .await
            .map(|bytes| Image::new(file.name(), file.raw_mime_type(), bytes))
            .map_err(|e| format!("Failed to read {}: {}", file.name(), e));
        link.send_message(Msg::ImageLoaded(generation, result));
    });

    true
}

pub fn handle_image_loaded(model: &mut Model, generation: u64, result: Result<Image, String>) -> bool {
    if generation != model.load_generation {
        return false;
    }
    model.image_loading = false;

    match result {
        Ok(image) => {
            if let Err(e) = model.image_source.select(Some(image)) {
                model.error = Some(e.to_string());
                return true;
            }
            // a new image supersedes whatever ran on the old one
            model.orchestrator.reset();
            refresh_presentation(model);
            model.error = model.load_notice.take();
        }
        Err(message) => {
            log::warn!("{}", message);
            model.load_notice = None;
            model.error = Some(message);
        }
    }

    true
}

pub fn handle_submit(model: &mut Model, ctx: &Context<Model>) -> bool {
    if !model.presentation.accepts_submission() {
        return false;
    }

    let image = model.image_source.image().cloned();
    let run = match model.orchestrator.begin(image.as_ref()) {
        Ok(run) => run,
        Err(e) => {
            model.error = Some(e.to_string());
            return true;
        }
    };
    let (Some(image), Some(services)) = (image, model.services.clone()) else {
        model.orchestrator.reset();
        model.error = Some("Service client is unavailable.".into());
        return true;
    };

    model.error = None;
    refresh_presentation(model);

    let link = ctx.link().clone();
    spawn_local(async move {
        let stage_link = link.clone();
        let outcome = execute(services.as_ref(), &image, |stage| {
            stage_link.send_message(Msg::StageStarted(run, stage));
        })
        .await;
        link.send_message(Msg::Settled(run, outcome));
    });

    true
}

pub fn handle_stage_started(model: &mut Model, run: RunId, stage: Stage) -> bool {
    if !model.orchestrator.advance(run, stage) {
        return false;
    }
    refresh_presentation(model);
    true
}

pub fn handle_settled(model: &mut Model, run: RunId, outcome: PipelineOutcome) -> bool {
    if !model.orchestrator.settle(run, outcome) {
        return false;
    }
    refresh_presentation(model);
    true
}

pub fn handle_open_image_detail(model: &mut Model) -> bool {
    if !model.presentation.open_image_detail() {
        return false;
    }

    let path = model.presentation.image_detail().map(str::to_string);
    model.image_detail_url = match (path, &model.services) {
        (Some(path), Some(services)) => services
            .endpoints()
            .masked_image_url(&path, Some(js_sys::Date::now() as i64))
            .map(|url| url.to_string())
            .map_err(|e| log::error!("Cannot resolve masked image {}: {}", path, e))
            .ok(),
        _ => None,
    };

    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            if file_list.length() > 0 {
                event.prevent_default();
                process_file_list(ctx, file_list);
                return true;
            }
        }
    }
    false
}

pub fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    let (images, skipped) = split_image_files(&file_list);

    for name in &skipped {
        log::warn!("Skipping non-image file: {}", name);
    }

    match (images.into_iter().next(), skipped_notice(&skipped)) {
        (Some(file), notice) => ctx.link().send_message(Msg::FileChosen(Some(file), notice)),
        (None, Some(notice)) => ctx.link().send_message(Msg::SetError(Some(notice))),
        (None, None) => {}
    }
}
