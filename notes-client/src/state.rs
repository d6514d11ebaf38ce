//! View-model for the notes UI.
//!
//! All UI behavior is a pure transition function: `reduce` takes the current
//! model and one action and returns the next model plus the side effects to
//! run. Network results come back in as further actions, so nothing in here
//! performs I/O and every transition is testable in isolation.

use crate::api::Note;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    /// Local cache of the note list, newest first.
    pub notes: Vec<Note>,
    pub is_loading: bool,
    pub show_form: bool,
    pub editing_note: Option<Note>,
    pub form_data: FormData,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            is_loading: true,
            show_form: false,
            editing_note: None,
            form_data: FormData::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fired once on mount.
    Started,
    NotesLoaded(Vec<Note>),
    LoadFailed,
    NewNotePressed,
    EditPressed(i64),
    TitleChanged(String),
    ContentChanged(String),
    FormSubmitted,
    CreateSucceeded(Note),
    UpdateSucceeded(Note),
    MutationFailed,
    CancelPressed,
    DeletePressed(i64),
    DeleteConfirmed(i64),
    DeleteDeclined,
    DeleteSucceeded(i64),
    DeleteFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchNotes,
    CreateNote { title: String, content: String },
    UpdateNote { id: i64, title: String, content: String },
    /// Ask the user before anything is sent over the wire.
    ConfirmDelete(i64),
    DeleteNote(i64),
}

fn close_form(model: &mut ViewModel) {
    model.show_form = false;
    model.editing_note = None;
    model.form_data = FormData::default();
}

pub fn reduce(mut model: ViewModel, action: Action) -> (ViewModel, Vec<Effect>) {
    match action {
        Action::Started => (model, vec![Effect::FetchNotes]),

        Action::NotesLoaded(notes) => {
            model.notes = notes;
            model.is_loading = false;
            (model, vec![])
        }

        // The list stays as it was; the user retries manually.
        Action::LoadFailed => {
            model.is_loading = false;
            (model, vec![])
        }

        Action::NewNotePressed => {
            model.show_form = true;
            model.editing_note = None;
            model.form_data = FormData::default();
            (model, vec![])
        }

        Action::EditPressed(id) => {
            if let Some(note) = model.notes.iter().find(|note| note.id == id).cloned() {
                model.form_data = FormData {
                    title: note.title.clone(),
                    content: note.content.clone(),
                };
                model.editing_note = Some(note);
                model.show_form = true;
            }
            (model, vec![])
        }

        Action::TitleChanged(title) => {
            if model.show_form {
                model.form_data.title = title;
            }
            (model, vec![])
        }

        Action::ContentChanged(content) => {
            if model.show_form {
                model.form_data.content = content;
            }
            (model, vec![])
        }

        // Empty fields never leave the form, mirroring the required-field
        // gating of the form inputs.
        Action::FormSubmitted => {
            if !model.show_form
                || model.form_data.title.is_empty()
                || model.form_data.content.is_empty()
            {
                return (model, vec![]);
            }

            let effect = match &model.editing_note {
                Some(note) => Effect::UpdateNote {
                    id: note.id,
                    title: model.form_data.title.clone(),
                    content: model.form_data.content.clone(),
                },
                None => Effect::CreateNote {
                    title: model.form_data.title.clone(),
                    content: model.form_data.content.clone(),
                },
            };
            (model, vec![effect])
        }

        Action::CreateSucceeded(note) => {
            model.notes.insert(0, note);
            close_form(&mut model);
            (model, vec![])
        }

        Action::UpdateSucceeded(note) => {
            if let Some(slot) = model.notes.iter_mut().find(|slot| slot.id == note.id) {
                *slot = note;
            }
            close_form(&mut model);
            (model, vec![])
        }

        // The form stays open with its data so the user can retry.
        Action::MutationFailed => (model, vec![]),

        Action::CancelPressed => {
            close_form(&mut model);
            (model, vec![])
        }

        Action::DeletePressed(id) => (model, vec![Effect::ConfirmDelete(id)]),

        Action::DeleteConfirmed(id) => (model, vec![Effect::DeleteNote(id)]),

        Action::DeleteDeclined => (model, vec![]),

        Action::DeleteSucceeded(id) => {
            model.notes.retain(|note| note.id != id);
            (model, vec![])
        }

        Action::DeleteFailed => (model, vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, title: &str, content: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: 1_000 + id,
            updated_at: 1_000 + id,
        }
    }

    fn loaded_model(notes: Vec<Note>) -> ViewModel {
        let (model, _) = reduce(ViewModel::default(), Action::NotesLoaded(notes));
        model
    }

    #[test]
    fn start_fetches_while_loading() {
        let model = ViewModel::default();
        assert!(model.is_loading);

        let (model, effects) = reduce(model, Action::Started);

        assert!(model.is_loading);
        assert_eq!(effects, vec![Effect::FetchNotes]);
    }

    #[test]
    fn loaded_notes_replace_the_list_once() {
        let (model, effects) = reduce(
            ViewModel::default(),
            Action::NotesLoaded(vec![note(2, "b", "2"), note(1, "a", "1")]),
        );

        assert!(!model.is_loading);
        assert_eq!(model.notes.len(), 2);
        assert!(effects.is_empty());
    }

    #[test]
    fn failed_load_clears_the_spinner_and_nothing_else() {
        let (model, effects) = reduce(ViewModel::default(), Action::LoadFailed);

        assert!(!model.is_loading);
        assert!(model.notes.is_empty());
        assert!(effects.is_empty());
    }

    #[test]
    fn new_note_opens_a_cleared_form() {
        let mut model = loaded_model(vec![note(1, "a", "1")]);
        model.form_data = FormData {
            title: "stale".to_string(),
            content: "stale".to_string(),
        };

        let (model, effects) = reduce(model, Action::NewNotePressed);

        assert!(model.show_form);
        assert!(model.editing_note.is_none());
        assert_eq!(model.form_data, FormData::default());
        assert!(effects.is_empty());
    }

    #[test]
    fn edit_prefills_the_form_from_the_note() {
        let model = loaded_model(vec![note(1, "a", "1"), note(2, "b", "2")]);

        let (model, effects) = reduce(model, Action::EditPressed(2));

        assert!(model.show_form);
        assert_eq!(model.editing_note.as_ref().unwrap().id, 2);
        assert_eq!(model.form_data.title, "b");
        assert_eq!(model.form_data.content, "2");
        assert!(effects.is_empty());
    }

    #[test]
    fn edit_of_unknown_id_is_a_no_op() {
        let model = loaded_model(vec![note(1, "a", "1")]);

        let (model, effects) = reduce(model.clone(), Action::EditPressed(42));

        assert!(!model.show_form);
        assert!(effects.is_empty());
    }

    #[test]
    fn submit_without_editing_target_creates() {
        let model = loaded_model(vec![]);
        let (model, _) = reduce(model, Action::NewNotePressed);
        let (model, _) = reduce(model, Action::TitleChanged("T".to_string()));
        let (model, _) = reduce(model, Action::ContentChanged("C".to_string()));

        let (_, effects) = reduce(model, Action::FormSubmitted);

        assert_eq!(
            effects,
            vec![Effect::CreateNote {
                title: "T".to_string(),
                content: "C".to_string(),
            }]
        );
    }

    #[test]
    fn submit_with_editing_target_updates() {
        let model = loaded_model(vec![note(7, "a", "1")]);
        let (model, _) = reduce(model, Action::EditPressed(7));
        let (model, _) = reduce(model, Action::ContentChanged("new".to_string()));

        let (_, effects) = reduce(model, Action::FormSubmitted);

        assert_eq!(
            effects,
            vec![Effect::UpdateNote {
                id: 7,
                title: "a".to_string(),
                content: "new".to_string(),
            }]
        );
    }

    #[test]
    fn submit_with_empty_field_emits_nothing() {
        let model = loaded_model(vec![]);
        let (model, _) = reduce(model, Action::NewNotePressed);
        let (model, _) = reduce(model, Action::TitleChanged("T".to_string()));

        let (model, effects) = reduce(model, Action::FormSubmitted);

        assert!(effects.is_empty());
        assert!(model.show_form);
    }

    #[test]
    fn successful_create_prepends_and_closes_the_form() {
        let model = loaded_model(vec![note(1, "old", "1")]);
        let (model, _) = reduce(model, Action::NewNotePressed);

        let (model, effects) = reduce(model, Action::CreateSucceeded(note(2, "new", "2")));

        assert_eq!(model.notes[0].id, 2);
        assert_eq!(model.notes[1].id, 1);
        assert!(!model.show_form);
        assert_eq!(model.form_data, FormData::default());
        assert!(effects.is_empty());
    }

    #[test]
    fn successful_update_replaces_in_place() {
        let model = loaded_model(vec![note(2, "b", "2"), note(1, "a", "1")]);
        let (model, _) = reduce(model, Action::EditPressed(1));

        let (model, effects) = reduce(model, Action::UpdateSucceeded(note(1, "a2", "1+")));

        assert_eq!(model.notes[0].id, 2);
        assert_eq!(model.notes[1].title, "a2");
        assert!(!model.show_form);
        assert!(model.editing_note.is_none());
        assert!(effects.is_empty());
    }

    #[test]
    fn failed_mutation_keeps_the_form_open_and_the_list_untouched() {
        let model = loaded_model(vec![note(1, "a", "1")]);
        let (model, _) = reduce(model, Action::EditPressed(1));
        let (model, _) = reduce(model, Action::TitleChanged("a2".to_string()));

        let before = model.clone();
        let (model, effects) = reduce(model, Action::MutationFailed);

        assert_eq!(model, before);
        assert!(model.show_form);
        assert!(effects.is_empty());
    }

    #[test]
    fn cancel_discards_the_form_without_effects() {
        let model = loaded_model(vec![note(1, "a", "1")]);
        let (model, _) = reduce(model, Action::EditPressed(1));

        let (model, effects) = reduce(model, Action::CancelPressed);

        assert!(!model.show_form);
        assert!(model.editing_note.is_none());
        assert_eq!(model.form_data, FormData::default());
        assert_eq!(model.notes.len(), 1);
        assert!(effects.is_empty());
    }

    #[test]
    fn delete_asks_for_confirmation_before_any_call() {
        let model = loaded_model(vec![note(1, "a", "1")]);

        let (model, effects) = reduce(model, Action::DeletePressed(1));

        assert_eq!(effects, vec![Effect::ConfirmDelete(1)]);
        assert_eq!(model.notes.len(), 1);
    }

    #[test]
    fn confirmed_delete_issues_the_call_and_declined_does_not() {
        let model = loaded_model(vec![note(1, "a", "1")]);

        let (model, effects) = reduce(model, Action::DeleteConfirmed(1));
        assert_eq!(effects, vec![Effect::DeleteNote(1)]);

        let (model, effects) = reduce(model, Action::DeleteDeclined);
        assert!(effects.is_empty());
        assert_eq!(model.notes.len(), 1);
    }

    #[test]
    fn successful_delete_removes_the_note_locally() {
        let model = loaded_model(vec![note(2, "b", "2"), note(1, "a", "1")]);

        let (model, effects) = reduce(model, Action::DeleteSucceeded(2));

        assert_eq!(model.notes.len(), 1);
        assert_eq!(model.notes[0].id, 1);
        assert!(effects.is_empty());
    }

    #[test]
    fn failed_delete_leaves_the_list_untouched() {
        let model = loaded_model(vec![note(1, "a", "1")]);

        let before = model.clone();
        let (model, effects) = reduce(model, Action::DeleteFailed);

        assert_eq!(model, before);
        assert!(effects.is_empty());
    }
}
