use yew::prelude::*;

const STEPS: [(&str, &str); 3] = [
    ("fa-tag", "Identify the packaging material"),
    ("fa-magnifying-glass", "Measure tears, stains, wet and shrink damage"),
    ("fa-star", "Earn recycling points"),
];

pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-recycle"></i> {" Package Points"}</h1>
            <p class="subtitle">{"Photograph a used package to find out what it is worth"}</p>
            <ol class="steps">
                { for STEPS.iter().map(|(icon, label)| html! {
                    <li key={*label}><i class={classes!("fa-solid", *icon)}></i>{ format!(" {}", label) }</li>
                })}
            </ol>
        </header>
    }
}
