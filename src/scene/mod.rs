mod components;
mod table;

use std::any::TypeId;
use std::marker::PhantomData;

pub use components::*;
pub use table::ComponentTable;

use crate::error::RegistryError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    pub(crate) const fn from_raw(id: u32) -> Self {
        Entity(id)
    }
    pub fn id(&self) -> u32 {
        self.0
    }
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

pub trait Component: Sized + 'static {
    fn table(registry: &Registry) -> &ComponentTable<Self>;
    fn table_mut(registry: &mut Registry) -> &mut ComponentTable<Self>;
}

macro_rules! component {
    ($ty:ty, $field:ident) => {
        impl Component for $ty {
            fn table(registry: &Registry) -> &ComponentTable<Self> {
                &registry.$field
            }
            fn table_mut(registry: &mut Registry) -> &mut ComponentTable<Self> {
                &mut registry.$field
            }
        }
    };
}

#[derive(Default)]
pub struct Registry {
    next_id: u32,
    transforms: ComponentTable<Transform>,
    rigid_bodies: ComponentTable<RigidBody>,
    materials: ComponentTable<Material>,
    spheres: ComponentTable<SphereRenderer>,
    lights: ComponentTable<LightSource>,
    cameras: ComponentTable<Camera>,
}

component!(Transform, transforms);
component!(RigidBody, rigid_bodies);
component!(Material, materials);
component!(SphereRenderer, spheres);
component!(LightSource, lights);
component!(Camera, cameras);

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn create(&mut self) -> Entity {
        let entity = Entity::from_raw(self.next_id);
        self.next_id += 1;
        entity
    }

    pub fn len(&self) -> usize {
        self.next_id as usize
    }

    pub fn is_empty(&self) -> bool {
        self.next_id == 0
    }

    pub fn is_valid(&self, entity: Entity) -> bool {
        entity.0 < self.next_id
    }

    pub fn attach<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), RegistryError> {
        if !self.is_valid(entity) {
            return Err(RegistryError::UnknownEntity(entity.0));
        }
        T::table_mut(self).insert(entity, value);
        Ok(())
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        T::table(self).get(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        T::table_mut(self).get_mut(entity)
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        T::table(self).contains(entity)
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + Clone {
        (0..self.next_id).map(Entity)
    }

    pub fn view<Q: Query>(&self) -> View<'_, Q> {
        View {
            registry: self,
            _query: PhantomData,
        }
    }

    // calls `f` with mutable access to `A` and `B` for every entity holding both, in creation order.
    // `A` and `B` must be different component types.
    pub fn each_mut<A, B, F>(&mut self, mut f: F)
    where
        A: Component,
        B: Component,
        F: FnMut(Entity, &mut A, &mut B),
    {
        debug_assert_ne!(
            TypeId::of::<A>(),
            TypeId::of::<B>(),
            "each_mut needs two distinct component types"
        );
        // take `A` out of the registry so both tables can be borrowed mutably at once.
        let mut first = std::mem::take(A::table_mut(self));
        let count = self.next_id;
        let second = B::table_mut(self);
        for entity in (0..count).map(Entity) {
            if let (Some(a), Some(b)) = (first.get_mut(entity), second.get_mut(entity)) {
                f(entity, a, b);
            }
        }
        *A::table_mut(self) = first;
    }
}

pub trait Query: 'static {
    fn matches(registry: &Registry, entity: Entity) -> bool;
}

macro_rules! query_tuple {
    ($($ty:ident),+) => {
        impl<$($ty: Component),+> Query for ($($ty,)+) {
            fn matches(registry: &Registry, entity: Entity) -> bool {
                $(registry.has::<$ty>(entity))&&+
            }
        }
    };
}

query_tuple!(A);
query_tuple!(A, B);
query_tuple!(A, B, C);
query_tuple!(A, B, C, D);

// Lazy view over the entities matching `Q`. Iterating doesn't consume it.
pub struct View<'r, Q> {
    registry: &'r Registry,
    _query: PhantomData<Q>,
}

impl<'r, Q: Query> View<'r, Q> {
    pub fn iter(&self) -> impl Iterator<Item = Entity> + 'r {
        let registry = self.registry;
        registry
            .entities()
            .filter(move |&entity| Q::matches(registry, entity))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn first(&self) -> Option<Entity> {
        self.iter().next()
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&'r T> {
        self.registry.get::<T>(entity)
    }
}

impl<'r, Q> Clone for View<'r, Q> {
    fn clone(&self) -> Self {
        View {
            registry: self.registry,
            _query: PhantomData,
        }
    }
}
