//! Настраиваемая область шаблона
//!
//! Все координаты и размеры задаются в процентах холста шаблона.
//! Геометрия хранится как перечисление по форме: у прямоугольника и
//! треугольника есть только ширина/высота, у круга и шестиугольника только радиус.

use crate::domain::common::EntityId;
use crate::shared::field_errors::FieldErrors;
use crate::shared::media::ImageFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

pub const CENTER_RANGE: (f64, f64) = (0.0, 100.0);
pub const SCALE_RANGE: (f64, f64) = (0.1, 5.0);
pub const ROTATION_RANGE: (f64, f64) = (-180.0, 180.0);
pub const FILE_SIZE_RANGE_MB: (f64, f64) = (0.1, 20.0);

const DEFAULT_BOX_SIZE: f64 = 20.0;
const DEFAULT_MAX_FILE_SIZE_MB: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaShape {
    Rectangle,
    Circle,
    Triangle,
    Hexagon,
}

impl AreaShape {
    pub const ALL: [AreaShape; 4] = [
        AreaShape::Rectangle,
        AreaShape::Circle,
        AreaShape::Triangle,
        AreaShape::Hexagon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaShape::Rectangle => "rectangle",
            AreaShape::Circle => "circle",
            AreaShape::Triangle => "triangle",
            AreaShape::Hexagon => "hexagon",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AreaShape::Rectangle => "Прямоугольник",
            AreaShape::Circle => "Круг",
            AreaShape::Triangle => "Треугольник",
            AreaShape::Hexagon => "Шестиугольник",
        }
    }

    /// Формы, размер которых задаётся радиусом
    pub fn uses_radius(&self) -> bool {
        matches!(self, AreaShape::Circle | AreaShape::Hexagon)
    }

    /// CSS clip-path для превью (`None` для прямоугольника и круга)
    pub fn clip_path(&self) -> Option<&'static str> {
        match self {
            AreaShape::Triangle => Some("polygon(50% 0%, 100% 100%, 0% 100%)"),
            AreaShape::Hexagon => Some("polygon(25% 0%, 75% 0%, 100% 50%, 75% 100%, 25% 100%, 0% 50%)"),
            AreaShape::Rectangle | AreaShape::Circle => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AreaGeometry {
    Rectangle { width: f64, height: f64 },
    Circle { radius: f64 },
    Triangle { width: f64, height: f64 },
    Hexagon { radius: f64 },
}

impl AreaGeometry {
    pub fn shape(&self) -> AreaShape {
        match self {
            AreaGeometry::Rectangle { .. } => AreaShape::Rectangle,
            AreaGeometry::Circle { .. } => AreaShape::Circle,
            AreaGeometry::Triangle { .. } => AreaShape::Triangle,
            AreaGeometry::Hexagon { .. } => AreaShape::Hexagon,
        }
    }

    /// Ширина и высота описанного прямоугольника
    pub fn size(&self) -> (f64, f64) {
        match *self {
            AreaGeometry::Rectangle { width, height } | AreaGeometry::Triangle { width, height } => {
                (width, height)
            }
            AreaGeometry::Circle { radius } | AreaGeometry::Hexagon { radius } => {
                (radius * 2.0, radius * 2.0)
            }
        }
    }

    pub fn radius(&self) -> Option<f64> {
        match *self {
            AreaGeometry::Circle { radius } | AreaGeometry::Hexagon { radius } => Some(radius),
            _ => None,
        }
    }

    /// Перевести геометрию в другую форму.
    ///
    /// Внутри одного семейства (ширина/высота или радиус) значения сохраняются.
    /// Из прямоугольника в радиус: `min(width, height) / 2`; обратно: `radius * 2`.
    pub fn convert_to(&self, shape: AreaShape) -> AreaGeometry {
        let (width, height) = self.size();
        let radius = self.radius().unwrap_or(width.min(height) / 2.0);
        match shape {
            AreaShape::Rectangle => AreaGeometry::Rectangle { width, height },
            AreaShape::Triangle => AreaGeometry::Triangle { width, height },
            AreaShape::Circle => AreaGeometry::Circle { radius },
            AreaShape::Hexagon => AreaGeometry::Hexagon { radius },
        }
    }

    /// Задать ширину (для форм с радиусом игнорируется)
    pub fn with_width(self, value: f64) -> AreaGeometry {
        match self {
            AreaGeometry::Rectangle { height, .. } => AreaGeometry::Rectangle { width: value, height },
            AreaGeometry::Triangle { height, .. } => AreaGeometry::Triangle { width: value, height },
            other => other,
        }
    }

    /// Задать высоту (для форм с радиусом игнорируется)
    pub fn with_height(self, value: f64) -> AreaGeometry {
        match self {
            AreaGeometry::Rectangle { width, .. } => AreaGeometry::Rectangle { width, height: value },
            AreaGeometry::Triangle { width, .. } => AreaGeometry::Triangle { width, height: value },
            other => other,
        }
    }

    /// Задать радиус (для прямоугольных форм игнорируется)
    pub fn with_radius(self, value: f64) -> AreaGeometry {
        match self {
            AreaGeometry::Circle { .. } => AreaGeometry::Circle { radius: value },
            AreaGeometry::Hexagon { .. } => AreaGeometry::Hexagon { radius: value },
            other => other,
        }
    }

    fn validate_into(&self, prefix: &str, errors: &mut FieldErrors) {
        match *self {
            AreaGeometry::Rectangle { width, height } | AreaGeometry::Triangle { width, height } => {
                if !(width > 0.0) {
                    errors.add(format!("{prefix}.width"), "Ширина должна быть больше 0");
                }
                if !(height > 0.0) {
                    errors.add(format!("{prefix}.height"), "Высота должна быть больше 0");
                }
            }
            AreaGeometry::Circle { radius } | AreaGeometry::Hexagon { radius } => {
                if !(radius > 0.0) {
                    errors.add(format!("{prefix}.radius"), "Радиус должен быть больше 0");
                }
            }
        }
    }
}

/// Положение области на холсте в процентах (для CSS `left/top/width/height`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "AreaRecord", try_from = "AreaRecord")]
pub struct CustomizableArea {
    pub id: Option<EntityId>,
    /// Клиентский ключ для списков; на сервер не отправляется
    pub key: Uuid,
    pub name: String,
    pub description: String,
    pub geometry: AreaGeometry,
    pub center_x: f64,
    pub center_y: f64,
    pub default_scale: f64,
    pub default_rotation: f64,
    pub default_position_x: f64,
    pub default_position_y: f64,
    pub order_index: i32,
    pub allowed_formats: BTreeSet<ImageFormat>,
    pub max_file_size_mb: f64,
}

impl CustomizableArea {
    /// Новая область со значениями по умолчанию. `position` начинается с 0.
    pub fn new_default(position: usize) -> Self {
        Self {
            id: None,
            key: Uuid::new_v4(),
            name: format!("Area {}", position + 1),
            description: String::new(),
            geometry: AreaGeometry::Rectangle {
                width: DEFAULT_BOX_SIZE,
                height: DEFAULT_BOX_SIZE,
            },
            center_x: 50.0,
            center_y: 50.0,
            default_scale: 1.0,
            default_rotation: 0.0,
            default_position_x: 0.0,
            default_position_y: 0.0,
            order_index: position as i32,
            allowed_formats: [ImageFormat::Jpeg, ImageFormat::Png].into_iter().collect(),
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
        }
    }

    pub fn shape(&self) -> AreaShape {
        self.geometry.shape()
    }

    pub fn set_shape(&mut self, shape: AreaShape) {
        self.geometry = self.geometry.convert_to(shape);
    }

    pub fn toggle_format(&mut self, format: ImageFormat) {
        if !self.allowed_formats.remove(&format) {
            self.allowed_formats.insert(format);
        }
    }

    pub fn bounding_box(&self) -> AreaBox {
        let (width, height) = self.geometry.size();
        AreaBox {
            left: self.center_x - width / 2.0,
            top: self.center_y - height / 2.0,
            width,
            height,
        }
    }

    /// Проверить область; ошибки добавляются с ключами `areas.<index>.<field>`
    pub fn validate_into(&self, index: usize, errors: &mut FieldErrors) {
        let prefix = format!("areas.{index}");

        if self.name.trim().is_empty() {
            errors.add(format!("{prefix}.name"), "Введите название области");
        }
        check_range(&mut *errors, &prefix, "centerX", self.center_x, CENTER_RANGE);
        check_range(&mut *errors, &prefix, "centerY", self.center_y, CENTER_RANGE);
        check_range(&mut *errors, &prefix, "defaultScale", self.default_scale, SCALE_RANGE);
        check_range(&mut *errors, &prefix, "defaultRotation", self.default_rotation, ROTATION_RANGE);
        check_range(&mut *errors, &prefix, "maxFileSizeMB", self.max_file_size_mb, FILE_SIZE_RANGE_MB);
        self.geometry.validate_into(&prefix, errors);

        if self.allowed_formats.is_empty() {
            errors.add(format!("{prefix}.allowedFormats"), "Выберите хотя бы один формат");
        }
    }
}

fn check_range(errors: &mut FieldErrors, prefix: &str, field: &str, value: f64, (min, max): (f64, f64)) {
    if !(min..=max).contains(&value) {
        errors.add(
            format!("{prefix}.{field}"),
            format!("Значение должно быть от {} до {}", min, max),
        );
    }
}

/// Представление области в API: форма и плоские поля геометрии.
/// Неактивные поля геометрии отправляются как `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRecord {
    #[serde(flatten, with = "crate::domain::common::record_id::optional")]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub shape: AreaShape,
    pub center_x: f64,
    pub center_y: f64,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default = "default_scale")]
    pub default_scale: f64,
    #[serde(default)]
    pub default_rotation: f64,
    #[serde(default)]
    pub default_position_x: f64,
    #[serde(default)]
    pub default_position_y: f64,
    #[serde(default)]
    pub order_index: i32,
    #[serde(default)]
    pub allowed_formats: Vec<String>,
    #[serde(rename = "maxFileSizeMB", default = "default_max_file_size")]
    pub max_file_size_mb: f64,
}

fn default_scale() -> f64 {
    1.0
}

fn default_max_file_size() -> f64 {
    DEFAULT_MAX_FILE_SIZE_MB
}

impl From<CustomizableArea> for AreaRecord {
    fn from(area: CustomizableArea) -> Self {
        let (width, height, radius) = match area.geometry {
            AreaGeometry::Rectangle { width, height } | AreaGeometry::Triangle { width, height } => {
                (Some(width), Some(height), None)
            }
            AreaGeometry::Circle { radius } | AreaGeometry::Hexagon { radius } => {
                (None, None, Some(radius))
            }
        };
        Self {
            id: area.id,
            name: area.name,
            description: area.description,
            shape: area.geometry.shape(),
            center_x: area.center_x,
            center_y: area.center_y,
            width,
            height,
            radius,
            default_scale: area.default_scale,
            default_rotation: area.default_rotation,
            default_position_x: area.default_position_x,
            default_position_y: area.default_position_y,
            order_index: area.order_index,
            allowed_formats: area
                .allowed_formats
                .iter()
                .map(|f| f.mime().to_string())
                .collect(),
            max_file_size_mb: area.max_file_size_mb,
        }
    }
}

impl TryFrom<AreaRecord> for CustomizableArea {
    type Error = String;

    fn try_from(record: AreaRecord) -> Result<Self, Self::Error> {
        let box_size = |shape: AreaShape| -> Result<(f64, f64), String> {
            match (record.width, record.height, record.radius) {
                (Some(w), Some(h), _) => Ok((w, h)),
                (_, _, Some(r)) => Ok((r * 2.0, r * 2.0)),
                _ => Err(format!("{} area without width/height", shape.as_str())),
            }
        };
        let radius = |shape: AreaShape| -> Result<f64, String> {
            match (record.radius, record.width, record.height) {
                (Some(r), _, _) => Ok(r),
                (None, Some(w), Some(h)) => Ok(w.min(h) / 2.0),
                _ => Err(format!("{} area without radius", shape.as_str())),
            }
        };

        let geometry = match record.shape {
            AreaShape::Rectangle => {
                let (width, height) = box_size(AreaShape::Rectangle)?;
                AreaGeometry::Rectangle { width, height }
            }
            AreaShape::Triangle => {
                let (width, height) = box_size(AreaShape::Triangle)?;
                AreaGeometry::Triangle { width, height }
            }
            AreaShape::Circle => AreaGeometry::Circle {
                radius: radius(AreaShape::Circle)?,
            },
            AreaShape::Hexagon => AreaGeometry::Hexagon {
                radius: radius(AreaShape::Hexagon)?,
            },
        };

        Ok(Self {
            id: record.id,
            key: Uuid::new_v4(),
            name: record.name,
            description: record.description,
            geometry,
            center_x: record.center_x,
            center_y: record.center_y,
            default_scale: record.default_scale,
            default_rotation: record.default_rotation,
            default_position_x: record.default_position_x,
            default_position_y: record.default_position_y,
            order_index: record.order_index,
            allowed_formats: record
                .allowed_formats
                .iter()
                .filter_map(|m| ImageFormat::from_mime(m))
                .collect(),
            max_file_size_mb: record.max_file_size_mb,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_area() {
        let area = CustomizableArea::new_default(2);
        assert_eq!(area.name, "Area 3");
        assert_eq!(area.order_index, 2);
        assert_eq!(area.shape(), AreaShape::Rectangle);
        let mut errors = FieldErrors::new();
        area.validate_into(0, &mut errors);
        assert!(errors.is_empty(), "{}", errors);
    }

    #[test]
    fn test_shape_conversion() {
        let mut area = CustomizableArea::new_default(0);
        area.geometry = AreaGeometry::Rectangle { width: 30.0, height: 10.0 };
        area.set_shape(AreaShape::Hexagon);
        assert_eq!(area.geometry, AreaGeometry::Hexagon { radius: 5.0 });
        area.set_shape(AreaShape::Circle);
        assert_eq!(area.geometry, AreaGeometry::Circle { radius: 5.0 });
        area.set_shape(AreaShape::Triangle);
        assert_eq!(area.geometry, AreaGeometry::Triangle { width: 10.0, height: 10.0 });
    }

    #[test]
    fn test_serialize_only_active_geometry() {
        let mut area = CustomizableArea::new_default(0);
        area.set_shape(AreaShape::Circle);
        let value = serde_json::to_value(&area).unwrap();
        assert_eq!(value["shape"], "circle");
        assert_eq!(value["radius"], json!(10.0));
        assert!(value["width"].is_null());
        assert!(value["height"].is_null());
        assert!(value.get("_id").is_none());
        assert_eq!(value["maxFileSizeMB"], json!(5.0));
        assert_eq!(value["allowedFormats"], json!(["image/jpeg", "image/png"]));
    }

    #[test]
    fn test_decode_legacy_record_with_both_geometries() {
        let value = json!({
            "_id": "a1",
            "name": "Front",
            "shape": "hexagon",
            "centerX": 40,
            "centerY": 60,
            "width": 20,
            "height": 20,
            "radius": 8,
            "allowedFormats": ["image/png", "image/gif"]
        });
        let area: CustomizableArea = serde_json::from_value(value).unwrap();
        assert_eq!(area.geometry, AreaGeometry::Hexagon { radius: 8.0 });
        assert_eq!(area.id, Some(EntityId::from("a1")));
        assert_eq!(area.default_scale, 1.0);
        assert_eq!(area.allowed_formats.len(), 1);
    }

    #[test]
    fn test_decode_rejects_missing_geometry() {
        let value = json!({ "name": "x", "shape": "rectangle", "centerX": 1, "centerY": 1 });
        assert!(serde_json::from_value::<CustomizableArea>(value).is_err());
    }

    #[test]
    fn test_validation_ranges() {
        let mut area = CustomizableArea::new_default(0);
        area.center_x = 120.0;
        area.default_scale = 0.0;
        area.default_rotation = -200.0;
        area.max_file_size_mb = 25.0;
        area.geometry = AreaGeometry::Circle { radius: 0.0 };
        area.allowed_formats.clear();
        area.name = " ".into();

        let mut errors = FieldErrors::new();
        area.validate_into(1, &mut errors);
        for field in [
            "areas.1.name",
            "areas.1.centerX",
            "areas.1.defaultScale",
            "areas.1.defaultRotation",
            "areas.1.maxFileSizeMB",
            "areas.1.radius",
            "areas.1.allowedFormats",
        ] {
            assert!(errors.contains(field), "missing {}", field);
        }
        assert!(!errors.contains("areas.1.centerY"));
    }

    #[test]
    fn test_bounding_box() {
        let mut area = CustomizableArea::new_default(0);
        area.geometry = AreaGeometry::Circle { radius: 10.0 };
        area.center_x = 30.0;
        area.center_y = 40.0;
        assert_eq!(
            area.bounding_box(),
            AreaBox { left: 20.0, top: 30.0, width: 20.0, height: 20.0 }
        );
    }

    #[test]
    fn test_toggle_format() {
        let mut area = CustomizableArea::new_default(0);
        area.toggle_format(ImageFormat::Svg);
        assert!(area.allowed_formats.contains(&ImageFormat::Svg));
        area.toggle_format(ImageFormat::Jpeg);
        assert!(!area.allowed_formats.contains(&ImageFormat::Jpeg));
    }
}
