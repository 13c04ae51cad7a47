use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::PipelineError;

/// Image payload as picked by the user. Clients copy the bytes into request bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Image {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// Locally built preview of the selected image, usable directly as an `<img src>`.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    fn for_image(image: &Image) -> Self {
        Self(format!("data:{};base64,{}", image.mime_type, STANDARD.encode(&image.bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Holds the currently selected image. Selecting again replaces it; the caller is
/// responsible for resetting any pipeline state tied to the previous one.
#[derive(Debug, Default)]
pub struct ImageSource {
    current: Option<(Image, PreviewHandle)>,
}

impl ImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, file: Option<Image>) -> Result<(&Image, &PreviewHandle), PipelineError> {
        let image = file.ok_or(PipelineError::NoFile)?;
        log::debug!("Selected image {} ({} bytes)", image.file_name, image.bytes.len());

        let preview = PreviewHandle::for_image(&image);
        let (image, preview) = &*self.current.insert((image, preview));
        Ok((image, preview))
    }

    pub fn image(&self) -> Option<&Image> {
        self.current.as_ref().map(|(image, _)| image)
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.current.as_ref().map(|(_, preview)| preview)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
