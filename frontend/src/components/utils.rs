use super::super::Model;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::FileList;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// Image files in the list, and the names of everything else.
pub fn split_image_files(file_list: &FileList) -> (Vec<GlooFile>, Vec<String>) {
    let mut images = Vec::new();
    let mut skipped = Vec::new();

    for file in (0..file_list.length()).filter_map(|i| file_list.item(i)) {
        if file.type_().starts_with("image/") {
            images.push(GlooFile::from(file));
        } else {
            skipped.push(file.name());
        }
    }

    (images, skipped)
}

/// Message shown when some of the picked files were not images.
pub fn skipped_notice(skipped: &[String]) -> Option<String> {
    match skipped {
        [] => None,
        [name] => Some(format!("Skipped non-image file: {}", name)),
        [name, rest @ ..] => Some(format!("Skipped non-image files: {} and {} more", name, rest.len())),
    }
}

pub fn render_error_message(model: &Model) -> Html {
    if let Some(error_msg) = &model.error {
        html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ error_msg }</p>
            </div>
        }
    } else {
        html! {}
    }
}
