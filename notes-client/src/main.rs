mod api;
mod state;

use std::collections::VecDeque;
use std::io::{self, Write};

use chrono::{DateTime, Local};
use serde_json::to_string_pretty;

use api::ApiClient;
use state::{Action, Effect, ViewModel, reduce};

/// Runs one effect and turns its outcome into the follow-up action.
async fn execute(api: &ApiClient, effect: Effect) -> Option<Action> {
    match effect {
        Effect::FetchNotes => match api.get_all_notes().await {
            Ok(notes) => Some(Action::NotesLoaded(notes)),
            Err(e) => {
                eprintln!("Error fetching notes: {e}");
                Some(Action::LoadFailed)
            }
        },

        Effect::CreateNote { title, content } => match api.create_note(&title, &content).await {
            Ok(note) => Some(Action::CreateSucceeded(note)),
            Err(e) => {
                eprintln!("Error creating note: {e}");
                Some(Action::MutationFailed)
            }
        },

        Effect::UpdateNote { id, title, content } => {
            match api.update_note(id, &title, &content).await {
                Ok(note) => Some(Action::UpdateSucceeded(note)),
                Err(e) => {
                    eprintln!("Error updating note: {e}");
                    Some(Action::MutationFailed)
                }
            }
        }

        Effect::ConfirmDelete(id) => {
            print!("Are you sure you want to delete this note? [y/N] ");
            io::stdout().flush().ok();

            let mut answer = String::new();
            io::stdin().read_line(&mut answer).ok();

            if answer.trim().eq_ignore_ascii_case("y") {
                Some(Action::DeleteConfirmed(id))
            } else {
                println!("Delete cancelled");
                Some(Action::DeleteDeclined)
            }
        }

        Effect::DeleteNote(id) => match api.delete_note(id).await {
            Ok(message) => {
                println!("{message}");
                Some(Action::DeleteSucceeded(id))
            }
            Err(e) => {
                eprintln!("Error deleting note: {e}");
                Some(Action::DeleteFailed)
            }
        },
    }
}

/// Feeds one user action into the reducer and drains the resulting
/// effect/action chain until the model settles.
async fn drive(mut model: ViewModel, action: Action, api: &ApiClient) -> ViewModel {
    let mut pending = VecDeque::from([action]);

    while let Some(action) = pending.pop_front() {
        let (next, effects) = reduce(model, action);
        model = next;

        for effect in effects {
            if let Some(follow_up) = execute(api, effect).await {
                pending.push_back(follow_up);
            }
        }
    }

    model
}

fn print_notes(model: &ViewModel) {
    if model.notes.is_empty() {
        println!("No notes yet\n");
        return;
    }

    for note in &model.notes {
        let time_str = DateTime::from_timestamp_millis(note.created_at)
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        println!("[{}] {} - {} ({})", note.id, note.title, note.content, time_str);
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let addr = std::env::var("NOTES_SERVER_ADDR")
        .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

    let api = ApiClient::new(addr.clone());
    println!("Using notes server at address {}\n", addr);

    let mut model = ViewModel::default();

    // Initial load
    println!("1. Loading notes...");
    model = drive(model, Action::Started, &api).await;
    print_notes(&model);

    // Create a note
    println!("2. Creating a note...");
    model = drive(model, Action::NewNotePressed, &api).await;
    model = drive(model, Action::TitleChanged("Test note".to_string()), &api).await;
    model = drive(model, Action::ContentChanged("Test content".to_string()), &api).await;
    model = drive(model, Action::FormSubmitted, &api).await;

    let created = model.notes.first().cloned().ok_or("note was not created")?;
    println!("Created note: {}\n", to_string_pretty(&created)?);

    // Update the note
    println!("3. Updating the note...");
    model = drive(model, Action::EditPressed(created.id), &api).await;
    model = drive(model, Action::ContentChanged("Test content 2".to_string()), &api).await;
    model = drive(model, Action::FormSubmitted, &api).await;

    let updated = model
        .notes
        .iter()
        .find(|note| note.id == created.id)
        .cloned()
        .ok_or("note was not updated")?;
    println!("Updated note: {}\n", to_string_pretty(&updated)?);

    // Delete the note, confirmation included
    println!("4. Deleting the note...");
    model = drive(model, Action::DeletePressed(created.id), &api).await;

    println!("\n5. Notes after deletion:");
    print_notes(&model);

    Ok(())
}
