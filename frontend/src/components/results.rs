use super::super::{Model, Msg};
use pipeline::{ErrorKind, ErrorPanel, ResultSummary, Stage, View};
use yew::prelude::*;

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Submitting => "Uploading image...",
        Stage::ClassifyingAndDetecting => "Classifying package and detecting damage...",
        Stage::Scoring => "Calculating points...",
    }
}

pub fn render_results(model: &Model, ctx: &Context<Model>) -> Html {
    match model.presentation.view() {
        View::Upload => html! {},
        View::Progress(stage) => html! {
            <div class="progress-indicator">
                <i class="fa-solid fa-spinner fa-spin"></i>
                <p>{ stage_label(*stage) }</p>
            </div>
        },
        View::Celebration(summary) => render_prediction(&summary.predicted_class),
        View::Result(summary) => render_summary(model, ctx, summary),
        View::Error(panel) => render_error_panel(panel),
    }
}

fn render_prediction(predicted_class: &str) -> Html {
    html! {
        <div class="results-container">
            <h2>{"Prediction Result"}</h2>
            <p><strong>{"Class: "}</strong>{ predicted_class }</p>
        </div>
    }
}

fn render_summary(model: &Model, ctx: &Context<Model>, summary: &ResultSummary) -> Html {
    html! {
        <>
            { render_prediction(&summary.predicted_class) }
            <div class="results-container">
                <p><strong>{"Points earned: "}</strong>{ summary.total_score.to_string() }</p>
                { render_image_detail_button(model, ctx) }
            </div>
        </>
    }
}

fn render_error_panel(panel: &ErrorPanel) -> Html {
    let title = match panel.kind {
        ErrorKind::Domain => "Could not score this package",
        _ => "Error",
    };

    html! {
        <>
            { panel.predicted_class.as_deref().map(render_prediction).unwrap_or_default() }
            <div class="results-container error-panel">
                <h2>{ title }</h2>
                <p>{ &panel.message }</p>
            </div>
        </>
    }
}

fn render_image_detail_button(model: &Model, ctx: &Context<Model>) -> Html {
    if !model.presentation.image_detail_available() {
        return html! {};
    }

    html! {
        <button class="analyze-btn detail-btn" onclick={ctx.link().callback(|_| Msg::OpenImageDetail)}>
            <i class="fa-solid fa-image"></i>{" View Detected Image"}
        </button>
    }
}

pub fn render_celebration(model: &Model, ctx: &Context<Model>) -> Html {
    let View::Celebration(summary) = model.presentation.view() else {
        return html! {};
    };

    html! {
        <div class="popup-overlay">
            <div class="popup celebration">
                <span class="party" role="img" aria-label="party">{"🎉"}</span>
                <div>{"Hurray! You earned"}</div>
                <div class="total-score">{ format!("{} points", summary.total_score) }</div>
                <div class="popup-row">
                    <strong>{"Predicted Material: "}</strong>{ &summary.predicted_class }
                </div>
                <div class="popup-row">
                    <strong>{"Damage Details (from detection):"}</strong>
                    <ul class="breakdown">
                        { for summary.breakdown.iter().map(|line| html! {
                            <li key={line.defect.clone()}>{ line.to_string() }</li>
                        })}
                    </ul>
                </div>
                { render_image_detail_button(model, ctx) }
                <button class="analyze-btn" onclick={ctx.link().callback(|_| Msg::DismissCelebration)}>
                    {"Close"}
                </button>
            </div>
        </div>
    }
}

pub fn render_image_detail(model: &Model, ctx: &Context<Model>) -> Html {
    let (Some(_), Some(url)) = (model.presentation.image_detail(), &model.image_detail_url) else {
        return html! {};
    };

    html! {
        <div class="popup-overlay detail-overlay">
            <div class="popup image-detail">
                <strong>{"Detected Masked Image"}</strong>
                <img src={url.clone()} alt="Detected Masked" />
                <button class="analyze-btn" onclick={ctx.link().callback(|_| Msg::CloseImageDetail)}>
                    {"Close"}
                </button>
            </div>
        </div>
    }
}
