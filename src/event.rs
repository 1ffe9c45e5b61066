use std::{borrow::Cow, fmt, sync::Arc};

/// A named occurrence dispatched through a [`Bus`](crate::Bus).
///
/// Implement this for your own event type (a struct or an enum). Events must be
/// `Send + Sync + 'static` because the bus:
/// - hands the same `&E` to every listener of a dispatch (Sync)
/// - moves the event into a detached task in concurrent mode (Send, 'static)
///
/// The bus never mutates an event. Listeners only ever see a shared reference,
/// so an event is effectively immutable for the whole fan-out.
///
/// # Event Names
///
/// `name()` drives [`NamedListener`](crate::NamedListener) filtering. Matching is
/// exact and case-sensitive. The name must not change once the event is built.
///
/// When using `#[derive(Event)]`, `name()` returns the enum variant name, the
/// value of a `name` field, or the struct identifier, in that order of preference.
pub trait Event: Send + Sync + 'static {
    /// Returns the name used for filtering and logging.
    fn name(&self) -> Cow<'_, str>;
}

/// Ready-made event carrying a name and an optional source tag.
///
/// Use it when a string name is all the routing you need and the interesting
/// data travels in the [`Payload`](crate::Payload).
///
/// ```rust
/// use listenbus::{BasicEvent, Event};
///
/// let event = BasicEvent::new("click").with_source("toolbar");
/// assert_eq!(event.name(), "click");
/// assert_eq!(event.source(), Some("toolbar"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicEvent {
    name: Arc<str>,
    source: Option<Arc<str>>,
}

impl BasicEvent {
    pub fn new<N>(name: N) -> Self
    where
        N: Into<Arc<str>>,
    {
        Self {
            name: name.into(),
            source: None,
        }
    }

    /// Tag the event with whoever raised it. The bus doesn't interpret the value.
    pub fn with_source<S>(mut self, source: S) -> Self
    where
        S: Into<Arc<str>>,
    {
        self.source = Some(source.into());
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl Event for BasicEvent {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&*self.name)
    }
}

impl From<&str> for BasicEvent {
    fn from(name: &str) -> Self {
        BasicEvent::new(name)
    }
}

impl From<String> for BasicEvent {
    fn from(name: String) -> Self {
        BasicEvent::new(name)
    }
}

impl fmt::Display for BasicEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}@{}", self.name, source),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: #[derive(Event)] can't be tested here because the macro generates
    // `impl ::listenbus::Event` which doesn't resolve within the crate itself.
    // The derive macro is tested in `tests/derive.rs`.

    #[derive(Clone)]
    #[allow(dead_code)]
    enum EnumEvent {
        Foo,
        Bar(i32),
    }

    impl Event for EnumEvent {
        fn name(&self) -> Cow<'_, str> {
            Cow::Borrowed(match self {
                EnumEvent::Foo => "Foo",
                EnumEvent::Bar(_) => "Bar",
            })
        }
    }

    #[test]
    fn test_manual_enum_event_name() {
        assert_eq!(EnumEvent::Foo.name(), "Foo");
        assert_eq!(EnumEvent::Bar(42).name(), "Bar");
    }

    #[test]
    fn test_basic_event_name_and_source() {
        let event = BasicEvent::new("x");
        assert_eq!(event.name(), "x");
        assert_eq!(event.source(), None);
        assert_eq!(event.to_string(), "x");

        let event = event.with_source("menu");
        assert_eq!(event.source(), Some("menu"));
        assert_eq!(event.to_string(), "x@menu");
    }

    #[test]
    fn test_basic_event_from_strings() {
        assert_eq!(BasicEvent::from("a"), BasicEvent::new("a"));
        assert_eq!(BasicEvent::from(String::from("b")).name(), "b");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_basic_event_serde_round_trip() {
        let event = BasicEvent::new("click").with_source("toolbar");
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"name":"click","source":"toolbar"}"#);

        let back: BasicEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);

        let bare: BasicEvent = serde_json::from_str(r#"{"name":"hover","source":null}"#).unwrap();
        assert_eq!(bare, BasicEvent::new("hover"));
    }
}
