use super::Entity;

// Values live contiguously in `dense`; `slots` maps an entity id to its index in `dense`.
pub struct ComponentTable<T> {
    dense: Vec<T>,
    slots: Vec<Option<usize>>,
}

impl<T> ComponentTable<T> {
    pub fn new() -> Self {
        ComponentTable {
            dense: Vec::new(),
            slots: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    fn slot(&self, entity: Entity) -> Option<usize> {
        self.slots.get(entity.index()).copied().flatten()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.slot(entity).is_some()
    }

    pub fn insert(&mut self, entity: Entity, value: T) -> Option<T> {
        if let Some(slot) = self.slot(entity) {
            return Some(std::mem::replace(&mut self.dense[slot], value));
        }
        if self.slots.len() <= entity.index() {
            self.slots.resize(entity.index() + 1, None);
        }
        self.slots[entity.index()] = Some(self.dense.len());
        self.dense.push(value);
        None
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slot(entity).map(|slot| &self.dense[slot])
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        match self.slot(entity) {
            Some(slot) => Some(&mut self.dense[slot]),
            None => None,
        }
    }
}

impl<T> Default for ComponentTable<T> {
    fn default() -> Self {
        ComponentTable::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut table = ComponentTable::new();
        let a = Entity::from_raw(3);
        let b = Entity::from_raw(0);
        assert_eq!(table.insert(a, 1.0f32), None);
        assert_eq!(table.insert(b, 2.0), None);
        assert_eq!(table.insert(a, 5.0), Some(1.0));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(a), Some(&5.0));
        assert_eq!(table.get(b), Some(&2.0));
        assert!(!table.contains(Entity::from_raw(1)));
        assert!(!table.contains(Entity::from_raw(100)));
    }
}
