use crate::domain::common::{EntityId, EntityRef};
use crate::shared::field_errors::FieldErrors;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Баннер главной страницы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroBanner {
    /// Клиентский ключ для списков
    #[serde(skip, default = "Uuid::new_v4")]
    pub key: Uuid,
    #[serde(default, alias = "imageUrl")]
    pub image: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default, alias = "url")]
    pub link: String,
}

impl HeroBanner {
    pub fn empty() -> Self {
        Self {
            key: Uuid::new_v4(),
            image: String::new(),
            title: String::new(),
            subtitle: String::new(),
            link: String::new(),
        }
    }
}

/// Содержимое главной страницы магазина
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
    #[serde(default, alias = "banners")]
    pub hero_banners: Vec<HeroBanner>,
    #[serde(default)]
    pub featured_categories: Vec<EntityRef>,
    #[serde(default)]
    pub featured_occasions: Vec<EntityRef>,
    #[serde(default)]
    pub featured_products: Vec<EntityRef>,
    #[serde(default, alias = "promoStrip")]
    pub promo_text: String,
}

/// Ответ `GET home-content`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HomeContentResponse {
    Wrapped {
        #[serde(alias = "data", alias = "homeContent")]
        content: HomeContent,
    },
    Plain(HomeContent),
}

impl HomeContentResponse {
    pub fn into_content(self) -> HomeContent {
        match self {
            HomeContentResponse::Wrapped { content } => content,
            HomeContentResponse::Plain(content) => content,
        }
    }
}

/// Список «избранного» на главной
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeaturedKind {
    Categories,
    Occasions,
    Products,
}

impl FeaturedKind {
    pub const ALL: [FeaturedKind; 3] = [
        FeaturedKind::Categories,
        FeaturedKind::Occasions,
        FeaturedKind::Products,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FeaturedKind::Categories => "Категории на главной",
            FeaturedKind::Occasions => "Поводы на главной",
            FeaturedKind::Products => "Товары на главной",
        }
    }
}

/// Редактируемая копия содержимого; сериализуется как тело `PUT home-content`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContentDraft {
    pub hero_banners: Vec<HeroBanner>,
    pub featured_categories: Vec<EntityId>,
    pub featured_occasions: Vec<EntityId>,
    pub featured_products: Vec<EntityId>,
    pub promo_text: String,
}

impl HomeContentDraft {
    pub fn from_content(content: &HomeContent) -> Self {
        let ids = |refs: &[EntityRef]| -> Vec<EntityId> { refs.iter().map(|r| r.id().clone()).collect() };
        Self {
            hero_banners: content.hero_banners.clone(),
            featured_categories: ids(&content.featured_categories),
            featured_occasions: ids(&content.featured_occasions),
            featured_products: ids(&content.featured_products),
            promo_text: content.promo_text.clone(),
        }
    }

    pub fn featured(&self, kind: FeaturedKind) -> &[EntityId] {
        match kind {
            FeaturedKind::Categories => &self.featured_categories,
            FeaturedKind::Occasions => &self.featured_occasions,
            FeaturedKind::Products => &self.featured_products,
        }
    }

    pub fn toggle_featured(&mut self, kind: FeaturedKind, id: EntityId) {
        let list = match kind {
            FeaturedKind::Categories => &mut self.featured_categories,
            FeaturedKind::Occasions => &mut self.featured_occasions,
            FeaturedKind::Products => &mut self.featured_products,
        };
        if let Some(pos) = list.iter().position(|x| x == &id) {
            list.remove(pos);
        } else {
            list.push(id);
        }
    }

    pub fn add_banner(&mut self) -> Uuid {
        let banner = HeroBanner::empty();
        let key = banner.key;
        self.hero_banners.push(banner);
        key
    }

    pub fn remove_banner(&mut self, key: Uuid) {
        self.hero_banners.retain(|b| b.key != key);
    }

    pub fn update_banner(&mut self, key: Uuid, f: impl FnOnce(&mut HeroBanner)) {
        if let Some(banner) = self.hero_banners.iter_mut().find(|b| b.key == key) {
            f(banner);
        }
    }

    /// Сдвинуть баннер на одну позицию (`up = true` – выше)
    pub fn move_banner(&mut self, key: Uuid, up: bool) {
        let Some(index) = self.hero_banners.iter().position(|b| b.key == key) else {
            return;
        };
        let target = if up { index.checked_sub(1) } else { Some(index + 1) };
        if let Some(target) = target.filter(|t| *t < self.hero_banners.len()) {
            self.hero_banners.swap(index, target);
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for (index, banner) in self.hero_banners.iter().enumerate() {
            if banner.image.trim().is_empty() {
                errors.add(format!("banners.{index}.image"), "Загрузите изображение баннера");
            }
            let link = banner.link.trim();
            if !link.is_empty() && !(link.starts_with('/') || link.starts_with("http")) {
                errors.add(
                    format!("banners.{index}.link"),
                    "Ссылка должна начинаться с / или http",
                );
            }
        }
        errors.into_result(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_wrapped_content() {
        let body = json!({
            "success": true,
            "data": {
                "banners": [{ "imageUrl": "https://cdn/b1.jpg", "title": "Spring" }],
                "featuredCategories": [{ "_id": "c1", "name": "Flowers" }, "c2"],
                "promoStrip": "Free delivery"
            }
        });
        let content = serde_json::from_value::<HomeContentResponse>(body)
            .unwrap()
            .into_content();
        let draft = HomeContentDraft::from_content(&content);
        assert_eq!(draft.hero_banners[0].image, "https://cdn/b1.jpg");
        assert_eq!(
            draft.featured(FeaturedKind::Categories),
            &[EntityId::from("c1"), EntityId::from("c2")]
        );
        assert_eq!(draft.promo_text, "Free delivery");
    }

    #[test]
    fn test_banner_editing() {
        let mut draft = HomeContentDraft::default();
        let first = draft.add_banner();
        let second = draft.add_banner();
        draft.update_banner(second, |b| b.image = "https://cdn/2.jpg".into());
        draft.move_banner(second, true);
        assert_eq!(draft.hero_banners[0].key, second);
        draft.move_banner(second, true);
        assert_eq!(draft.hero_banners[0].key, second);

        let errors = draft.validate().unwrap_err();
        assert!(errors.contains("banners.1.image"));

        draft.remove_banner(first);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_request_body_omits_client_keys() {
        let mut draft = HomeContentDraft::default();
        let key = draft.add_banner();
        draft.update_banner(key, |b| b.link = "/occasions".into());
        draft.toggle_featured(FeaturedKind::Products, EntityId::from("p1"));
        let body = serde_json::to_value(&draft).unwrap();
        assert!(body["heroBanners"][0].get("key").is_none());
        assert_eq!(body["featuredProducts"], json!(["p1"]));

        draft.toggle_featured(FeaturedKind::Products, EntityId::from("p1"));
        assert!(draft.featured(FeaturedKind::Products).is_empty());
    }
}
