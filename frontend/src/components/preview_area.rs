use super::super::Model;
use yew::prelude::*;

pub fn render_preview_area(model: &Model) -> Html {
    if model.image_loading {
        return html! {
            <div class="loading-preview">
                <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
                <p style="margin-left: 10px;">{"Loading preview..."}</p>
            </div>
        };
    }

    match (model.image_source.image(), model.image_source.preview()) {
        (Some(image), Some(preview)) => html! {
            <div id="preview-container">
                <img id="actual-image-preview"
                    src={preview.as_str().to_string()}
                    alt={image.file_name.clone()}
                    title={image.file_name.clone()} />
            </div>
        },
        _ => html! {},
    }
}
