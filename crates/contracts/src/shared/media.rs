//! Изображения: допустимые форматы, слоты изображений формы, ответ загрузки

use serde::{Deserialize, Serialize};

/// Максимум дополнительных изображений товара
pub const MAX_ADDITIONAL_IMAGES: usize = 5;

/// Форматы, которые клиент может загрузить в настраиваемую область
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/svg+xml")]
    Svg,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Svg];

    pub fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Svg => "image/svg+xml",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            "image/svg+xml" => Some(ImageFormat::Svg),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Png => "PNG",
            ImageFormat::Svg => "SVG",
        }
    }
}

/// Слот изображения в форме: уже загруженное (URL) или выбранный, но ещё не отправленный файл
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSlot {
    Existing(String),
    Pending(String),
}

impl ImageSlot {
    pub fn is_pending(&self) -> bool {
        matches!(self, ImageSlot::Pending(_))
    }

    pub fn existing_url(&self) -> Option<&str> {
        match self {
            ImageSlot::Existing(url) => Some(url),
            ImageSlot::Pending(_) => None,
        }
    }
}

/// Ответ `upload-s3-image`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponse {
    #[serde(alias = "imageUrl", alias = "location")]
    pub url: String,
}
