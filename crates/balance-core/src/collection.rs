use std::{collections::HashMap, fmt, marker::PhantomData};

use serde::{
    de::{SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};
use uuid::Uuid;

/// Anything stored in a [`Collection`].
pub trait Entity {
    fn id(&self) -> Uuid;
}

/// Id-keyed map that remembers insertion order.
///
/// Lookups, updates and removals go through the map; iteration follows the
/// order in which ids were first inserted. On the wire it is a plain JSON
/// array in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: HashMap<Uuid, T>,
    order: Vec<Uuid>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.items.contains_key(&id)
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    /// Append an item, or replace it in place if its id is already present.
    pub fn insert(&mut self, item: T) {
        let id = item.id();
        if self.items.insert(id, item).is_none() {
            self.order.push(id);
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Option<T> {
        let removed = self.items.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        Some(removed)
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    pub fn ids(&self) -> &[Uuid] {
        &self.order
    }
}

impl<T: Entity> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Collection::new();
        for item in iter {
            collection.insert(item);
        }
        collection
    }
}

impl<T: Entity + Serialize> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self.iter() {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<'de, T: Entity + Deserialize<'de>> Deserialize<'de> for Collection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CollectionVisitor<T>(PhantomData<T>);

        impl<'de, T: Entity + Deserialize<'de>> Visitor<'de> for CollectionVisitor<T> {
            type Value = Collection<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a sequence of entities")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut collection = Collection::new();
                while let Some(item) = seq.next_element::<T>()? {
                    collection.insert(item);
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_seq(CollectionVisitor(PhantomData))
    }
}
