//! Progress notifications delivered to registered observers.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use marquee_core::PageType;
use serde::Serialize;
use tracing::{error, warn};

/// Search progress event types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SearchEvent {
    PageFetched { url: String, bytes: usize },
    PageParsed { url: String },
    PageTypeDetermined { url: String, page_type: PageType },
}

impl SearchEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PageFetched { .. } => "page_fetched",
            Self::PageParsed { .. } => "page_parsed",
            Self::PageTypeDetermined { .. } => "page_type_determined",
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::PageFetched { url, .. }
            | Self::PageParsed { url }
            | Self::PageTypeDetermined { url, .. } => url,
        }
    }
}

pub trait SearchObserver: Send + Sync {
    fn on_event(&self, event: &SearchEvent) -> anyhow::Result<()>;
}

impl<F> SearchObserver for F
where
    F: Fn(&SearchEvent) -> anyhow::Result<()> + Send + Sync,
{
    fn on_event(&self, event: &SearchEvent) -> anyhow::Result<()> {
        self(event)
    }
}

/// Registered observers, notified in registration order.
///
/// Each delivery is isolated: an observer that returns an error or panics
/// is logged and skipped, and the rest still see the event.
#[derive(Clone, Default)]
pub struct ObserverSet {
    observers: Vec<Arc<dyn SearchObserver>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, observer: impl SearchObserver + 'static) {
        self.observers.push(Arc::new(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver `event` to every observer. Returns how many handled it
    /// without failing.
    pub fn notify(&self, event: &SearchEvent) -> usize {
        let mut delivered = 0;
        for (index, observer) in self.observers.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| observer.on_event(event))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => {
                    warn!(observer = index, event = event.name(), error = %e, "observer failed");
                }
                Err(payload) => {
                    error!(
                        observer = index,
                        event = event.name(),
                        panic = panic_message(payload.as_ref()),
                        "observer panicked"
                    );
                }
            }
        }
        delivered
    }
}

impl std::fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSet")
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn parsed() -> SearchEvent {
        SearchEvent::PageParsed {
            url: "https://www.imdb.com/find?s=all&q=x".into(),
        }
    }

    #[test]
    fn closures_are_observers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut set = ObserverSet::new();
        let sink = seen.clone();
        set.add(move |e: &SearchEvent| -> anyhow::Result<()> {
            sink.lock().unwrap().push(e.name());
            Ok(())
        });

        assert_eq!(set.notify(&parsed()), 1);
        assert_eq!(*seen.lock().unwrap(), vec!["page_parsed"]);
    }

    #[test]
    fn failing_observers_do_not_stop_delivery() {
        let seen = Arc::new(Mutex::new(0));
        let mut set = ObserverSet::new();
        set.add(|_: &SearchEvent| -> anyhow::Result<()> { anyhow::bail!("observer offline") });
        set.add(|_: &SearchEvent| -> anyhow::Result<()> { panic!("observer bug") });
        let sink = seen.clone();
        set.add(move |_: &SearchEvent| -> anyhow::Result<()> {
            *sink.lock().unwrap() += 1;
            Ok(())
        });

        assert_eq!(set.notify(&parsed()), 1);
        assert_eq!(set.notify(&parsed()), 1);
        assert_eq!(*seen.lock().unwrap(), 2);
    }

    #[test]
    fn empty_set() {
        let set = ObserverSet::new();
        assert!(set.is_empty());
        assert_eq!(set.notify(&parsed()), 0);
    }

    #[test]
    fn event_serializes_with_type_tag() {
        let event = SearchEvent::PageTypeDetermined {
            url: "u".into(),
            page_type: PageType::SearchResults,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "page_type_determined");
        assert_eq!(json["data"]["page_type"], "search_results");
        assert_eq!(event.url(), "u");
    }

    #[test]
    fn panic_payloads_are_readable() {
        let boxed: Box<dyn Any + Send> = Box::new(String::from("boom"));
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let boxed: Box<dyn Any + Send> = Box::new("static boom");
        assert_eq!(panic_message(boxed.as_ref()), "static boom");
        let boxed: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(boxed.as_ref()), "non-string panic payload");
    }
}
