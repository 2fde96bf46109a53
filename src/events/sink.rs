use super::Event;

/// Receiver of engine events.
///
/// Implemented for `crossbeam::channel::Sender<Event>` and for closures `Fn(Event)`.
pub trait EventSink {
    fn send(&self, event: Event);
}

impl EventSink for crossbeam::channel::Sender<Event> {
    fn send(&self, event: Event) {
        if let Err(err) = crossbeam::channel::Sender::send(self, event) {
            log::warn!("effects event dropped: {err}");
        }
    }
}

impl<F: Fn(Event)> EventSink for F {
    fn send(&self, event: Event) {
        self(event);
    }
}
