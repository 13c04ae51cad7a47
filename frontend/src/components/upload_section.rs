use super::super::Model;
use super::super::Msg;
use super::utils::{debounce, skipped_notice, split_image_files};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div class="upload-section">
            { render_file_input_area(model, ctx) }
            { render_submit_button(model, ctx) }
        </div>
    }
}

fn render_file_input_area(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let (images, skipped) = input.files().as_ref().map(split_image_files).unwrap_or_default();

        input.set_value("");

        let notice = skipped_notice(&skipped);
        match images.into_iter().next() {
            Some(file) => Msg::FileChosen(Some(file), notice),
            None if notice.is_some() => Msg::SetError(notice),
            None => Msg::FileChosen(None, None),
        }
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_| {
        let input = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file-input"));
        if let Some(input) = input {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    let has_image = model.image_source.image().is_some();

    html! {
        <>
            <input
                type="file"
                id="file-input"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <button
                id="upload-button"
                class="analyze-btn"
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <i class="fa-solid fa-upload"></i> { if has_image { " Change Image" } else { " Upload Image" } }
            </button>

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Drag & drop a package photo here, paste, or click"}</p>
                    <p class="file-types">{"Supported formats: JPG, PNG, WEBP"}</p>
                </div>
            </div>
        </>
    }
}

fn render_submit_button(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();
    let busy = !model.presentation.accepts_submission();

    html! {
        <button
            id="submit-button"
            class="analyze-btn"
            disabled={busy || model.image_loading}
            onclick={debounce(300, move || link.send_message(Msg::Submit))}
        >
            {
                if busy {
                    html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Processing..."}</> }
                } else {
                    html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Classify & Calculate Points"}</> }
                }
            }
        </button>
    }
}
