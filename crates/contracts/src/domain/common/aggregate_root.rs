use super::EntityId;

/// Трейт для корня агрегата
///
/// Экземплярные методы дают доступ к данным записи, статические описывают
/// агрегат для UI (ключ вкладки, подписи меню).
pub trait AggregateRoot {
    /// Получить ID записи
    fn id(&self) -> &EntityId;

    /// Получить название записи для списков и заголовков
    fn display_name(&self) -> &str;

    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции (например, "product")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str;

    /// Полное имя агрегата, используется как ключ вкладки (например, "a001_product")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
