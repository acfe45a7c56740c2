/// An arena that owns the memory of a live schema graph.
///
/// Every node of a live [Schema](super::Schema), from object types down to single arguments, is
/// allocated onto this arena and referenced as `&'a T`. This keeps the cyclic schema graph cheap
/// to build, and it gives every node a stable address for the lifetime of the arena, which is
/// what the marshaller uses as the node's identity.
///
/// Like any arena the memory is released all at once when the [SchemaArena] is dropped. Values
/// with their own heap allocations, like default values, are not dropped individually.
pub struct SchemaArena {
    /// An arena allocator that holds the memory allocated for the schema's lifetime
    pub arena: bumpalo::Bump,
}

impl SchemaArena {
    /// Create a new schema arena with a preallocated arena.
    pub fn new() -> Self {
        let arena = bumpalo::Bump::new();
        SchemaArena { arena }
    }

    /// Put the value of `item` onto the arena and return a reference to it.
    #[inline]
    pub fn alloc<T>(&self, item: T) -> &T {
        self.arena.alloc(item)
    }

    /// Allocate an `&str` slice onto the arena and return a reference to it.
    ///
    /// This is useful when the original slice has an undefined lifetime.
    #[inline]
    pub fn alloc_str(&self, str: &str) -> &str {
        self.arena.alloc_str(str)
    }

    /// Puts a `String` onto the arena and returns a reference to it to tie the `String`'s lifetime
    /// to this arena without reallocating or copying it.
    #[inline]
    pub fn alloc_string(&self, str: String) -> &str {
        self.arena.alloc(str)
    }
}

impl Default for SchemaArena {
    fn default() -> Self {
        Self::new()
    }
}
