use super::area::CustomizableArea;
use crate::shared::field_errors::FieldErrors;

/// Упорядоченный список областей шаблона с выбранной (активной) областью
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaListEditor {
    areas: Vec<CustomizableArea>,
    active: Option<usize>,
}

impl AreaListEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_areas(mut areas: Vec<CustomizableArea>) -> Self {
        areas.sort_by_key(|a| a.order_index);
        let mut editor = Self { areas, active: None };
        editor.renumber();
        editor
    }

    pub fn areas(&self) -> &[CustomizableArea] {
        &self.areas
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&CustomizableArea> {
        self.active.and_then(|i| self.areas.get(i))
    }

    /// Добавить область по умолчанию и выбрать её
    pub fn add_area(&mut self) -> usize {
        let index = self.areas.len();
        self.areas.push(CustomizableArea::new_default(index));
        self.active = Some(index);
        index
    }

    /// Удалить область. Выбор сдвигается вместе с оставшимися элементами.
    pub fn remove_area(&mut self, index: usize) {
        if index >= self.areas.len() {
            return;
        }
        self.areas.remove(index);
        self.active = match self.active {
            Some(a) if a == index => None,
            Some(a) if a > index => Some(a - 1),
            other => other,
        };
        self.renumber();
    }

    pub fn select(&mut self, index: usize) {
        if index < self.areas.len() {
            self.active = Some(index);
        }
    }

    pub fn clear_selection(&mut self) {
        self.active = None;
    }

    /// Изменить активную область; без выбора ничего не делает
    pub fn update_active(&mut self, f: impl FnOnce(&mut CustomizableArea)) {
        if let Some(area) = self.active.and_then(|i| self.areas.get_mut(i)) {
            f(area);
        }
    }

    pub fn update_at(&mut self, index: usize, f: impl FnOnce(&mut CustomizableArea)) {
        if let Some(area) = self.areas.get_mut(index) {
            f(area);
        }
    }

    pub fn move_up(&mut self, index: usize) {
        if index == 0 || index >= self.areas.len() {
            return;
        }
        self.swap(index, index - 1);
    }

    pub fn move_down(&mut self, index: usize) {
        if index + 1 >= self.areas.len() {
            return;
        }
        self.swap(index, index + 1);
    }

    fn swap(&mut self, from: usize, to: usize) {
        self.areas.swap(from, to);
        self.active = match self.active {
            Some(a) if a == from => Some(to),
            Some(a) if a == to => Some(from),
            other => other,
        };
        self.renumber();
    }

    fn renumber(&mut self) {
        for (position, area) in self.areas.iter_mut().enumerate() {
            area.order_index = position as i32;
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.areas.is_empty() {
            errors.add("areas", "Добавьте хотя бы одну область");
        }
        for (index, area) in self.areas.iter().enumerate() {
            area.validate_into(index, &mut errors);
        }
        errors.into_result(())
    }

    pub fn into_areas(self) -> Vec<CustomizableArea> {
        self.areas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(n: usize) -> AreaListEditor {
        let mut editor = AreaListEditor::new();
        for _ in 0..n {
            editor.add_area();
        }
        editor
    }

    fn names(editor: &AreaListEditor) -> Vec<&str> {
        editor.areas().iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_add_area_selects_it() {
        let mut editor = AreaListEditor::new();
        assert_eq!(editor.add_area(), 0);
        assert_eq!(editor.add_area(), 1);
        assert_eq!(editor.active_index(), Some(1));
        assert_eq!(names(&editor), vec!["Area 1", "Area 2"]);
    }

    #[test]
    fn test_remove_active_clears_selection() {
        let mut editor = editor_with(3);
        editor.select(1);
        editor.remove_area(1);
        assert_eq!(editor.active_index(), None);
        assert_eq!(names(&editor), vec!["Area 1", "Area 3"]);
    }

    #[test]
    fn test_remove_before_active_shifts_selection() {
        let mut editor = editor_with(4);
        editor.select(3);
        let key = editor.active().unwrap().key;
        editor.remove_area(0);
        assert_eq!(editor.active_index(), Some(2));
        assert_eq!(editor.active().unwrap().key, key);
    }

    #[test]
    fn test_remove_after_active_keeps_selection() {
        let mut editor = editor_with(3);
        editor.select(0);
        editor.remove_area(2);
        assert_eq!(editor.active_index(), Some(0));
        assert_eq!(editor.len(), 2);
    }

    #[test]
    fn test_removal_law_for_every_pair() {
        for n in 1..5 {
            for active in 0..n {
                for removed in 0..n {
                    let mut editor = editor_with(n);
                    editor.select(active);
                    editor.remove_area(removed);
                    let expected = if active == removed {
                        None
                    } else if active > removed {
                        Some(active - 1)
                    } else {
                        Some(active)
                    };
                    assert_eq!(editor.active_index(), expected, "n={n} active={active} removed={removed}");
                    let orders: Vec<i32> = editor.areas().iter().map(|a| a.order_index).collect();
                    assert_eq!(orders, (0..(n as i32 - 1)).collect::<Vec<_>>());
                }
            }
        }
    }

    #[test]
    fn test_select_out_of_range_ignored() {
        let mut editor = editor_with(2);
        editor.select(0);
        editor.select(5);
        assert_eq!(editor.active_index(), Some(0));
    }

    #[test]
    fn test_update_active() {
        let mut editor = editor_with(2);
        editor.select(0);
        editor.update_active(|a| a.name = "Front".into());
        assert_eq!(names(&editor), vec!["Front", "Area 2"]);

        editor.clear_selection();
        editor.update_active(|a| a.name = "ignored".into());
        assert_eq!(names(&editor), vec!["Front", "Area 2"]);
    }

    #[test]
    fn test_move_keeps_selection_on_moved_area() {
        let mut editor = editor_with(3);
        editor.select(2);
        editor.move_up(2);
        assert_eq!(names(&editor), vec!["Area 1", "Area 3", "Area 2"]);
        assert_eq!(editor.active_index(), Some(1));
        assert_eq!(editor.areas()[1].order_index, 1);

        editor.move_down(1);
        assert_eq!(names(&editor), vec!["Area 1", "Area 2", "Area 3"]);
        assert_eq!(editor.active_index(), Some(2));

        editor.move_down(2);
        editor.move_up(0);
        assert_eq!(names(&editor), vec!["Area 1", "Area 2", "Area 3"]);
    }

    #[test]
    fn test_validate_requires_an_area() {
        let editor = AreaListEditor::new();
        let errors = editor.validate().unwrap_err();
        assert!(errors.contains("areas"));
        assert!(editor_with(1).validate().is_ok());
    }
}
