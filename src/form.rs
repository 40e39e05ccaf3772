// src/form.rs

use crate::models::{ContentRequest, Platform, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Topic,
    Platform,
    Tone,
    Audience,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Topic,
        FormField::Platform,
        FormField::Tone,
        FormField::Audience,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_text(self) -> bool {
        matches!(self, FormField::Topic | FormField::Audience)
    }
}

/// Editable copy of the four request fields.
#[derive(Debug, Clone, Default)]
pub struct RequestForm {
    pub topic: String,
    pub platform: Platform,
    pub audience: String,
    pub tone: Tone,
    pub focus: FormField,
}

impl RequestForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        !self.topic.trim().is_empty() && !self.audience.trim().is_empty()
    }

    /// Snapshot of the form. `None` while `busy` or when a required field is
    /// blank. The form keeps its contents either way.
    pub fn submit(&self, busy: bool) -> Option<ContentRequest> {
        if busy {
            return None;
        }
        ContentRequest::new(
            self.topic.clone(),
            self.platform,
            self.audience.clone(),
            self.tone,
        )
        .ok()
    }

    /// Restores all fields to their defaults. Does nothing while `busy`.
    pub fn reset(&mut self, busy: bool) -> bool {
        if busy {
            return false;
        }
        self.topic.clear();
        self.audience.clear();
        self.platform = Platform::default();
        self.tone = Tone::default();
        self.focus = FormField::default();
        true
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    /// Steps the focused selector forwards (`true`) or backwards.
    pub fn cycle_selection(&mut self, forward: bool) {
        match self.focus {
            FormField::Platform => {
                self.platform = if forward {
                    self.platform.next()
                } else {
                    self.platform.prev()
                }
            }
            FormField::Tone => {
                self.tone = if forward {
                    self.tone.next()
                } else {
                    self.tone.prev()
                }
            }
            _ => {}
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Topic => Some(&mut self.topic),
            FormField::Audience => Some(&mut self.audience),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RequestForm {
        let mut form = RequestForm::new();
        form.topic = "Remote work".into();
        form.audience = "Managers".into();
        form.platform = Platform::Instagram;
        form.tone = Tone::Witty;
        form
    }

    #[test]
    fn test_submit_emits_snapshot_and_keeps_fields() {
        let form = filled();
        let req = form.submit(false).unwrap();
        assert_eq!(req.topic(), "Remote work");
        assert_eq!(req.platform(), Platform::Instagram);
        assert_eq!(req.audience(), "Managers");
        assert_eq!(req.tone(), Tone::Witty);
        assert_eq!(form.topic, "Remote work");
    }

    #[test]
    fn test_submit_blocked_by_blank_fields() {
        let mut form = filled();
        form.topic = "   ".into();
        assert!(form.submit(false).is_none());

        let mut form = filled();
        form.audience.clear();
        assert!(form.submit(false).is_none());
    }

    #[test]
    fn test_busy_blocks_submit_and_reset() {
        let mut form = filled();
        assert!(form.submit(true).is_none());
        assert!(!form.reset(true));
        assert_eq!(form.topic, "Remote work");
        assert_eq!(form.platform, Platform::Instagram);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = filled();
        form.focus = FormField::Audience;
        assert!(form.reset(false));
        assert!(form.topic.is_empty());
        assert!(form.audience.is_empty());
        assert_eq!(form.platform, Platform::LinkedIn);
        assert_eq!(form.tone, Tone::Professional);
        assert_eq!(form.focus, FormField::Topic);
    }

    #[test]
    fn test_editing_targets_focused_text_field() {
        let mut form = RequestForm::new();
        form.input_char('A');
        form.input_char('I');
        form.focus_prev();
        assert_eq!(form.focus, FormField::Audience);
        form.input_char('x');
        form.delete_char();
        form.delete_char();
        assert_eq!(form.topic, "AI");
        assert_eq!(form.audience, "");

        form.focus = FormField::Platform;
        form.input_char('z');
        assert_eq!(form.topic, "AI");
    }

    #[test]
    fn test_cycle_selection_only_touches_focused_selector() {
        let mut form = RequestForm::new();
        form.cycle_selection(true);
        assert_eq!(form.platform, Platform::LinkedIn);

        form.focus_next();
        form.cycle_selection(true);
        assert_eq!(form.platform, Platform::Instagram);

        form.focus_next();
        form.cycle_selection(false);
        assert_eq!(form.tone, Tone::Urgent);
        assert_eq!(form.platform, Platform::Instagram);
    }
}
