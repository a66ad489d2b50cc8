use std::fmt;

/// Named points where registered handlers run.
///
/// `Start` and `Stop` run once per process. The rest run per request in the
/// order of [`LifecycleEvent::ORDER`], with the route handler between
/// `BeforeHandle` and `Error`; `Error` only runs when something failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LifecycleEvent {
    Start,
    Request,
    Parse,
    Transform,
    BeforeHandle,
    Error,
    Stop,
}

impl LifecycleEvent {
    /// Execution order an external dispatcher must honour.
    pub const ORDER: [LifecycleEvent; 7] = [
        LifecycleEvent::Start,
        LifecycleEvent::Request,
        LifecycleEvent::Parse,
        LifecycleEvent::Transform,
        LifecycleEvent::BeforeHandle,
        LifecycleEvent::Error,
        LifecycleEvent::Stop,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEvent::Start => "start",
            LifecycleEvent::Request => "request",
            LifecycleEvent::Parse => "parse",
            LifecycleEvent::Transform => "transform",
            LifecycleEvent::BeforeHandle => "beforeHandle",
            LifecycleEvent::Error => "error",
            LifecycleEvent::Stop => "stop",
        }
    }

    /// Whether the event runs once per process rather than per request
    #[must_use]
    pub fn is_process_wide(&self) -> bool {
        matches!(self, LifecycleEvent::Start | LifecycleEvent::Stop)
    }

    /// Whether the event can be attached per route and merged with global hooks
    #[must_use]
    pub fn is_route_local(&self) -> bool {
        matches!(
            self,
            LifecycleEvent::Transform | LifecycleEvent::BeforeHandle | LifecycleEvent::Error
        )
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
