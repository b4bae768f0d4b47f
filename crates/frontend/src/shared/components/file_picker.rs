use crate::shared::api::UploadFile;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

fn picked_files(ev: &web_sys::Event) -> Vec<UploadFile> {
    let Some(input) = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        return Vec::new();
    };

    let mut files = Vec::new();
    if let Some(list) = input.files() {
        for i in 0..list.length() {
            if let Some(file) = list.get(i) {
                files.push(UploadFile::from_dom(file));
            }
        }
    }
    // Повторный выбор того же файла тоже должен давать change
    input.set_value("");
    files
}

/// Выбор файлов через `<input type="file">`
#[component]
pub fn FilePicker(
    #[prop(into)] label: String,
    /// Значение атрибута `accept`
    #[prop(optional)]
    accept: &'static str,
    #[prop(optional)] multiple: bool,
    on_pick: Callback<Vec<UploadFile>>,
) -> impl IntoView {
    view! {
        <label class="button button--secondary file-picker">
            {crate::shared::icons::icon("upload")}
            <span>{label}</span>
            <input
                type="file"
                accept=accept
                multiple=multiple
                style="display: none;"
                on:change=move |ev| {
                    let files = picked_files(&ev);
                    if !files.is_empty() {
                        on_pick.run(files);
                    }
                }
            />
        </label>
    }
}
