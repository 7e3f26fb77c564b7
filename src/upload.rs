use freela_api::Attachment;
use leptos::ev::Event;
use leptos::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

/// The file picked in an `<input type="file">`, if any.
pub fn selected_file(ev: &Event) -> Option<File> {
    let input: HtmlInputElement = event_target(ev);
    input.files()?.get(0)
}

/// Read a picked file fully into memory for a multipart upload.
pub async fn read_attachment(file: File) -> Result<Attachment, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Não foi possível ler o arquivo: {:?}", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime = file.type_();
    Ok(Attachment {
        file_name: file.name(),
        mime: if mime.is_empty() { None } else { Some(mime) },
        bytes,
    })
}
