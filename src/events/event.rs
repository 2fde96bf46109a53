use serde::{Deserialize, Serialize};

use crate::{pointer::InputClass, scene::ElementId, section::SectionId, theme::Theme};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadMounted {
    pub class: InputClass,
    pub theme: Theme,
    pub section: SectionId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadUnmounted {
    /// Number of elements reset during teardown
    pub reset: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadSectionChanged {
    pub from: SectionId,
    pub to: SectionId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadThemeChanged {
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadElementScaled {
    pub id: ElementId,
    pub scale: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadElementReset {
    pub id: ElementId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadTouch {
    pub pos: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    Mounted(PayloadMounted),
    Unmounted(PayloadUnmounted),
    SectionChanged(PayloadSectionChanged),
    ThemeChanged(PayloadThemeChanged),
    ElementScaled(PayloadElementScaled),
    ElementReset(PayloadElementReset),
    TouchFadeStarted(PayloadTouch),
    TouchFadeEnded,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_contract_section_changed() {
        let event = Event::SectionChanged(PayloadSectionChanged {
            from: SectionId::Home,
            to: SectionId::Skills,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"SectionChanged":{"from":"home","to":"skills"}}"#);

        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_contract_element_scaled() {
        let event = Event::ElementScaled(PayloadElementScaled {
            id: ElementId(7),
            scale: 1.5,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"ElementScaled":{"id":7,"scale":1.5}}"#);
    }

    #[test]
    fn test_contract_touch_fade_ended() {
        let json = serde_json::to_string(&Event::TouchFadeEnded).unwrap();
        assert_eq!(json, r#""TouchFadeEnded""#);
    }
}
