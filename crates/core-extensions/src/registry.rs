use crate::entity::{RowEntity, Setter};
use core_rowstore::{Schema, Value};
use dashmap::DashMap;
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

static GLOBAL_REGISTRY: LazyLock<SetterRegistry> = LazyLock::new(SetterRegistry::new);

/// Column name to setter table for one entity type.
pub struct Setters<T> {
    by_name: HashMap<&'static str, Setter<T>>,
}

impl<T: RowEntity> Setters<T> {
    /// When several members map to the same column, the first one declared
    /// keeps the column and the later ones are never set.
    fn build() -> Self {
        let mut by_name = HashMap::new();
        for (name, setter) in T::setters() {
            if by_name.contains_key(name) {
                tracing::debug!(
                    column = name,
                    entity = type_name::<T>(),
                    "column already mapped, ignoring later member"
                );
                continue;
            }
            by_name.insert(name, setter);
        }
        Self { by_name }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Setter<T>> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Lines the setters up with the ordinals of `schema`.
    /// Columns without a matching member get no setter.
    #[must_use]
    pub fn bind(&self, schema: &Schema) -> BoundSetters<T> {
        let mut slots = vec![None; schema.len()];
        for (name, setter) in &self.by_name {
            if let Some(ordinal) = schema.ordinal(name) {
                slots[ordinal] = Some((*name, *setter));
            }
        }
        BoundSetters { slots }
    }
}

/// Positional setters for one batch of rows sharing a schema.
pub struct BoundSetters<T> {
    slots: Vec<Option<(&'static str, Setter<T>)>>,
}

impl<T> BoundSetters<T> {
    #[must_use]
    pub fn matched(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Applies every bound setter to its value. Values past the bound width
    /// are ignored; database-null is passed on as `None`.
    pub fn apply(&self, target: &mut T, values: &[Value]) {
        for (slot, value) in self.slots.iter().zip(values) {
            let Some((column, setter)) = *slot else {
                continue;
            };
            let cell = (!value.is_null()).then_some(value);
            if !setter(&mut *target, cell) {
                tracing::trace!(
                    column,
                    kind = %value.kind(),
                    entity = type_name::<T>(),
                    "skipped value of mismatched kind"
                );
            }
        }
    }
}

/// Per-type cache of setter tables, built on first use.
pub struct SetterRegistry {
    tables: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Default for SetterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SetterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: DashMap::new(),
        }
    }

    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_REGISTRY
    }

    pub fn setters<T: RowEntity>(&self) -> Arc<Setters<T>> {
        let type_id = TypeId::of::<T>();
        let cached = match self.tables.get(&type_id) {
            Some(entry) => Arc::clone(entry.value()),
            None => {
                let entry = self.tables.entry(type_id).or_insert_with(|| {
                    tracing::trace!(entity = type_name::<T>(), "building setter table");
                    let table: Arc<dyn Any + Send + Sync> = Arc::new(Setters::<T>::build());
                    table
                });
                Arc::clone(entry.value())
            }
        };
        cached
            .downcast::<Setters<T>>()
            .unwrap_or_else(|_| Arc::new(Setters::build()))
    }

    #[must_use]
    pub fn contains<T: RowEntity>(&self) -> bool {
        self.tables.contains_key(&TypeId::of::<T>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Setter table for `T` from the process-wide registry.
#[must_use]
pub fn setters<T: RowEntity>() -> Arc<Setters<T>> {
    SetterRegistry::global().setters::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row_entity;
    use std::sync::Arc;

    #[derive(Debug, Default, PartialEq)]
    struct Item {
        sku: String,
        qty: i32,
    }

    row_entity!(Item { sku, qty });

    #[derive(Debug, Default, PartialEq)]
    struct Label {
        primary: String,
        fallback: String,
    }

    row_entity!(Label { primary => "text", fallback => "text" });

    #[test]
    fn test_table_is_built_once() {
        let registry = SetterRegistry::new();
        assert!(!registry.contains::<Item>());
        let first = registry.setters::<Item>();
        let second = registry.setters::<Item>();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_bind_intersects_schema() {
        let registry = SetterRegistry::new();
        let schema = Schema::new(["extra", "qty", "other"]);
        let bound = registry.setters::<Item>().bind(&schema);
        assert_eq!(bound.matched(), 1);

        let mut item = Item::default();
        bound.apply(
            &mut item,
            &[Value::from("ignored"), Value::Int32(5), Value::Null],
        );
        assert_eq!(
            item,
            Item {
                sku: String::new(),
                qty: 5
            }
        );
    }

    #[test]
    fn test_apply_ignores_values_past_schema() {
        let schema = Schema::new(["sku"]);
        let bound = SetterRegistry::new().setters::<Item>().bind(&schema);
        let mut item = Item::default();
        bound.apply(&mut item, &[Value::from("a-1"), Value::Int32(7)]);
        assert_eq!(item.sku, "a-1");
        assert_eq!(item.qty, 0);
    }

    #[test]
    fn test_first_member_wins_shared_column() {
        let table = SetterRegistry::new().setters::<Label>();
        assert_eq!(table.len(), 1);

        let bound = table.bind(&Schema::new(["text"]));
        let mut label = Label::default();
        bound.apply(&mut label, &[Value::from("hello")]);
        assert_eq!(
            label,
            Label {
                primary: "hello".to_string(),
                fallback: String::new(),
            }
        );
    }
}
