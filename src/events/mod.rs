mod event;
mod sink;

pub use event::{
    Event, PayloadElementReset, PayloadElementScaled, PayloadMounted, PayloadSectionChanged,
    PayloadThemeChanged, PayloadTouch, PayloadUnmounted,
};

pub use sink::EventSink;
