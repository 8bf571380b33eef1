//! The single modal slot: an editor form or a delete confirmation.

use uuid::Uuid;

use crate::actions::{Mutation, Payload};
use crate::data::Resource;
use crate::forms::{Form, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Create,
    Edit(Uuid),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorModal {
    pub resource: Resource,
    pub target: EditTarget,
    pub form: Form,
    /// Messages from the last failed validation.
    pub errors: ValidationErrors,
    /// A save is in flight.
    pub busy: bool,
}

impl EditorModal {
    pub fn title(&self) -> String {
        match self.target {
            EditTarget::Create => format!("New {}", self.resource.label().to_lowercase()),
            EditTarget::Edit(_) => format!("Edit {}", self.resource.label().to_lowercase()),
        }
    }

    /// Validates the form into the mutation to submit.
    ///
    /// On failure the errors are kept on the modal for display.
    pub fn submit(&mut self) -> Result<Mutation, ValidationErrors> {
        match self.form.payload() {
            Ok(payload) => {
                self.errors = ValidationErrors::default();
                Ok(self.mutation(payload))
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    fn mutation(&self, payload: Payload) -> Mutation {
        match self.target {
            EditTarget::Create => Mutation::Create(payload),
            EditTarget::Edit(id) => Mutation::Update { id, payload },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmDelete {
    pub resource: Resource,
    pub id: Uuid,
    /// Human-readable name of the record.
    pub label: String,
    pub busy: bool,
}

impl ConfirmDelete {
    pub fn mutation(&self) -> Mutation {
        Mutation::Delete {
            resource: self.resource,
            id: self.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Editor(EditorModal),
    ConfirmDelete(ConfirmDelete),
}

/// Holds at most one open modal. Opening a new one replaces the old one and
/// closing discards unsaved input.
#[derive(Debug, Clone, Default)]
pub struct ModalHost {
    current: Option<Modal>,
    /// Bumped every time a modal opens.
    generation: u64,
}

impl ModalHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Modal> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Modal> {
        self.current.as_mut()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorModal> {
        match self.current.as_mut() {
            Some(Modal::Editor(editor)) => Some(editor),
            _ => None,
        }
    }

    /// `existing` selects edit mode; the form must already be pre-populated from it.
    pub fn open_editor(&mut self, resource: Resource, existing: Option<Uuid>, form: Form) {
        let target = existing.map_or(EditTarget::Create, EditTarget::Edit);
        self.generation += 1;
        self.current = Some(Modal::Editor(EditorModal {
            resource,
            target,
            form,
            errors: ValidationErrors::default(),
            busy: false,
        }));
    }

    pub fn confirm_delete(&mut self, resource: Resource, id: Uuid, label: impl Into<String>) {
        self.generation += 1;
        self.current = Some(Modal::ConfirmDelete(ConfirmDelete {
            resource,
            id,
            label: label.into(),
            busy: false,
        }));
    }

    pub fn set_busy(&mut self, busy: bool) {
        match self.current.as_mut() {
            Some(Modal::Editor(editor)) => editor.busy = busy,
            Some(Modal::ConfirmDelete(confirm)) => confirm.busy = busy,
            None => {}
        }
    }

    pub fn is_busy(&self) -> bool {
        match &self.current {
            Some(Modal::Editor(editor)) => editor.busy,
            Some(Modal::ConfirmDelete(confirm)) => confirm.busy,
            None => false,
        }
    }

    /// Identifies the open modal; `None` when nothing is open.
    pub fn open_id(&self) -> Option<u64> {
        self.current.as_ref().map(|_| self.generation)
    }

    pub fn close(&mut self) {
        self.current = None;
    }
}
