use crate::shared::form_status::FormStatus;
use crate::shared::reference::ReferenceLists;
use contracts::domain::a013_home_content::aggregate::{FeaturedKind, HeroBanner, HomeContent, HomeContentDraft};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use uuid::Uuid;

#[derive(Clone, Copy)]
pub struct HomeContentVm {
    pub draft: RwSignal<HomeContentDraft>,
    pub loaded: RwSignal<bool>,
    pub reference: RwSignal<ReferenceLists>,
    /// Баннер, для которого сейчас идёт загрузка изображения
    pub uploading: RwSignal<Option<Uuid>>,
    pub featured_tab: RwSignal<String>,
    pub status: FormStatus,
}

pub fn featured_key(kind: FeaturedKind) -> String {
    format!("{:?}", kind).to_lowercase()
}

impl HomeContentVm {
    pub fn new() -> Self {
        Self {
            draft: RwSignal::new(HomeContentDraft::default()),
            loaded: RwSignal::new(false),
            reference: RwSignal::new(ReferenceLists::default()),
            uploading: RwSignal::new(None),
            featured_tab: RwSignal::new(featured_key(FeaturedKind::Categories)),
            status: FormStatus::new(),
        }
    }

    pub fn load(&self, content: &HomeContent) {
        self.draft.set(HomeContentDraft::from_content(content));
        self.loaded.set(true);
    }

    pub fn active_featured(&self) -> FeaturedKind {
        let key = self.featured_tab.get();
        FeaturedKind::ALL
            .into_iter()
            .find(|k| featured_key(*k) == key)
            .unwrap_or(FeaturedKind::Categories)
    }

    pub fn selected_ids(&self, kind: FeaturedKind) -> Signal<Vec<EntityId>> {
        let draft = self.draft;
        Signal::derive(move || draft.with(|d| d.featured(kind).to_vec()))
    }

    pub fn toggle_featured(&self, kind: FeaturedKind, id: EntityId) {
        self.draft.update(|d| d.toggle_featured(kind, id));
    }

    pub fn banner_keys(&self) -> Vec<Uuid> {
        self.draft.with(|d| d.hero_banners.iter().map(|b| b.key).collect())
    }

    pub fn banner(&self, key: Uuid) -> Option<HeroBanner> {
        self.draft
            .with(|d| d.hero_banners.iter().find(|b| b.key == key).cloned())
    }

    pub fn edit_banner(&self, key: Uuid, f: impl FnOnce(&mut HeroBanner)) {
        self.draft.update(|d| d.update_banner(key, f));
    }

    /// Ошибка поля баннера по его текущей позиции
    pub fn banner_error(&self, key: Uuid, field: &'static str) -> Signal<Option<String>> {
        let draft = self.draft;
        let fields = self.status.fields;
        Signal::derive(move || {
            let index = draft.with(|d| d.hero_banners.iter().position(|b| b.key == key))?;
            fields.with(|e| e.get(&format!("banners.{index}.{field}")).map(str::to_string))
        })
    }
}

impl Default for HomeContentVm {
    fn default() -> Self {
        Self::new()
    }
}
