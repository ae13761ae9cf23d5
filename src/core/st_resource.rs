use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

/// A single-threaded, reference-counted resource with interior mutability.
///
/// `StResource` lets the world cache hand out chunk handles that outlive the
/// borrow of the cache itself. A render adapter can hold a read guard on one
/// chunk while the world keeps inserting newly generated neighbours into its
/// map, which a plain `&Chunk` borrowed out of the map would not allow.
///
/// # Type Parameters
/// - `T`: The type of the contained resource
///
/// # Examples
///
/// ```
/// use voxel_world::core::StResource;
///
/// let counter = StResource::new(0);
/// let alias = counter.clone();
///
/// *alias.get_mut() += 1;
/// assert_eq!(*counter.get(), 1);
/// ```
///
/// # Panics
/// - `get_mut` panics if any guard on the same resource is still alive
/// - `get` panics if a mutable guard on the same resource is still alive
///
/// Shared guards may be nested freely, which is what meshing relies on when it
/// samples the chunk it is building through the world.
pub struct StResource<T> {
    resource: Rc<RefCell<T>>,
}

impl<T> StResource<T> {
    /// Wraps `resource` in a new shared handle.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Rc::new(RefCell::new(resource)),
        }
    }

    /// Returns a read guard for the contained value.
    pub fn get(&self) -> Ref<'_, T> {
        self.resource.borrow()
    }

    /// Returns a write guard for the contained value.
    pub fn get_mut(&self) -> RefMut<'_, T> {
        self.resource.borrow_mut()
    }

    /// Returns `true` when both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.resource, &other.resource)
    }
}

impl<T> Clone for StResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for StResource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StResource").field(&*self.get()).finish()
    }
}
