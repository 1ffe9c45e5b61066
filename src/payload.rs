use std::{any::Any, fmt, sync::Arc};

/// A single opaque payload value.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Auxiliary data travelling with an event through one dispatch.
///
/// An ordered sequence of zero or more opaque values. Every listener of a
/// dispatch sees the same payload, by shared reference. Values are reference
/// counted, so cloning a payload never copies the data itself.
///
/// Build one with the builder methods or with the [`payload!`](crate::payload!) macro:
///
/// ```rust
/// use listenbus::{Payload, payload};
///
/// let a = Payload::new().with(42u32).with("ok");
/// let b = payload![42u32, "ok"];
///
/// assert_eq!(a.get::<u32>(0), Some(&42));
/// assert_eq!(b.get::<&str>(1), Some(&"ok"));
/// assert_eq!(b.get::<String>(1), None);
/// ```
#[derive(Clone, Default)]
pub struct Payload {
    values: Vec<Value>,
}

impl Payload {
    /// An empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value and return the payload (builder style).
    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    pub fn push<T: Any + Send + Sync>(&mut self, value: T) {
        self.values.push(Arc::new(value));
    }

    /// Append an already shared value without re-wrapping it.
    pub fn push_shared(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Typed access to the value at `index`.
    ///
    /// Returns `None` when the index is out of range or the value isn't a `T`.
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.values.get(index)?.downcast_ref::<T>()
    }

    /// Untyped access to the value at `index`.
    pub fn raw(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Payload::new()
    }
}

impl From<Vec<Value>> for Payload {
    fn from(values: Vec<Value>) -> Self {
        Payload { values }
    }
}

impl FromIterator<Value> for Payload {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Payload {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("len", &self.values.len())
            .finish()
    }
}

/// Build a [`Payload`] from a list of values, kept in argument order.
///
/// ```rust
/// use listenbus::payload;
///
/// let empty = payload![];
/// assert!(empty.is_empty());
///
/// let p = payload![1i32, String::from("two"), 3.0f64];
/// assert_eq!(p.len(), 3);
/// assert_eq!(p.get::<String>(1).map(String::as_str), Some("two"));
/// ```
#[macro_export]
macro_rules! payload {
    () => {
        $crate::Payload::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Payload::new()$(.with($value))+
    };
}
