//! Scene lookup capability consumed by the camera rig.

use glam::Vec3;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

/// Read-only view of the scene graph the rig needs.
pub trait SceneQuery {
    /// Opaque object handle.
    type Handle: Copy + PartialEq + std::fmt::Debug;

    /// Look an object up by name.
    fn find(&self, name: &str) -> Option<Self::Handle>;

    /// Name of an object.
    fn name(&self, handle: Self::Handle) -> &str;

    /// Whether the object allows a close minimum camera distance.
    fn is_inspectable(&self, handle: Self::Handle) -> bool;

    /// Write the object's world position into `out`. Unknown handles write
    /// the origin.
    fn write_world_position(&self, handle: Self::Handle, out: &mut Vec3);
}

new_key_type! {
    /// Handle to an object in a [`SceneTable`].
    pub struct ObjectId;
}

#[derive(Debug, Clone)]
struct SceneObject {
    name: String,
    local_position: Vec3,
    parent: Option<ObjectId>,
    inspectable: bool,
}

/// Name-indexed table of scene objects with translation-only parenting.
#[derive(Debug, Default, Clone)]
pub struct SceneTable {
    objects: SlotMap<ObjectId, SceneObject>,
    by_name: FxHashMap<String, ObjectId>,
}

impl SceneTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a root object. A previous object with the same name is
    /// replaced.
    pub fn insert(&mut self, name: &str, position: Vec3) -> ObjectId {
        self.insert_object(name, position, None)
    }

    /// Insert an object positioned relative to `parent`.
    pub fn insert_child(
        &mut self,
        parent: ObjectId,
        name: &str,
        local_position: Vec3,
    ) -> ObjectId {
        self.insert_object(name, local_position, Some(parent))
    }

    fn insert_object(
        &mut self,
        name: &str,
        local_position: Vec3,
        parent: Option<ObjectId>,
    ) -> ObjectId {
        let _ = self.remove(name);
        let id = self.objects.insert(SceneObject {
            name: name.to_owned(),
            local_position,
            parent,
            inspectable: false,
        });
        let _ = self.by_name.insert(name.to_owned(), id);
        id
    }

    /// Remove an object by name. Children of a removed object become roots
    /// at their local position.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.by_name.remove(name) {
            Some(id) => self.objects.remove(id).is_some(),
            None => false,
        }
    }

    /// Mark an object as inspectable (or not).
    pub fn set_inspectable(&mut self, id: ObjectId, inspectable: bool) {
        if let Some(obj) = self.objects.get_mut(id) {
            obj.inspectable = inspectable;
        }
    }

    /// Move an object relative to its parent.
    pub fn set_local_position(&mut self, id: ObjectId, position: Vec3) {
        if let Some(obj) = self.objects.get_mut(id) {
            obj.local_position = position;
        }
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl SceneQuery for SceneTable {
    type Handle = ObjectId;

    fn find(&self, name: &str) -> Option<ObjectId> {
        self.by_name.get(name).copied()
    }

    fn name(&self, handle: ObjectId) -> &str {
        self.objects.get(handle).map_or("", |obj| obj.name.as_str())
    }

    fn is_inspectable(&self, handle: ObjectId) -> bool {
        self.objects.get(handle).is_some_and(|obj| obj.inspectable)
    }

    fn write_world_position(&self, handle: ObjectId, out: &mut Vec3) {
        *out = Vec3::ZERO;
        let mut next = Some(handle);
        while let Some(obj) = next.and_then(|id| self.objects.get(id)) {
            *out += obj.local_position;
            next = obj.parent;
        }
    }
}
