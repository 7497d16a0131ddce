use shared::domain::{Field, Section};

use crate::schema::FieldErrors;

/// Which of the two form sections is expanded. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionState {
    expanded: Option<Section>,
}

impl Default for SectionState {
    fn default() -> Self {
        Self {
            expanded: Some(Section::Academic),
        }
    }
}

impl SectionState {
    pub fn expanded(&self) -> Option<Section> {
        self.expanded
    }

    pub fn is_expanded(&self, section: Section) -> bool {
        self.expanded == Some(section)
    }

    /// Header click: opens `section`, or collapses everything if it was already open.
    pub fn toggle(&mut self, section: Section) {
        self.expanded = if self.is_expanded(section) {
            None
        } else {
            Some(section)
        };
    }

    pub fn expand(&mut self, section: Section) {
        self.expanded = Some(section);
    }

    pub fn collapse_all(&mut self) {
        self.expanded = None;
    }

    pub fn fields(section: Section) -> impl Iterator<Item = Field> {
        Field::ALL
            .into_iter()
            .filter(move |field| field.section() == section)
    }
}

/// Section holding the first reported error, so a front-end can reveal it.
pub fn first_invalid_section(errors: &FieldErrors) -> Option<Section> {
    errors.first().map(|(field, _)| field.section())
}
