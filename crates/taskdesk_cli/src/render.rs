//! Human-readable rendering of command outcomes.

use taskdesk_core::{Outcome, TaskDetail, TaskState};

pub fn render(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Categories { items } if items.is_empty() => "(no categories)".to_string(),
        Outcome::Categories { items } => items
            .iter()
            .map(|category| category.title.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        Outcome::CategoryCreated { category } => {
            format!("Created category \"{}\".", category.title)
        }
        Outcome::CategoryDeleted { title, removed: 0 } => {
            format!("No category named \"{title}\"; nothing deleted.")
        }
        Outcome::CategoryDeleted { title, .. } => {
            format!("Deleted category \"{title}\" and its tasks.")
        }
        Outcome::Tasks { items } if items.is_empty() => "(no tasks)".to_string(),
        Outcome::Tasks { items } => items
            .iter()
            .map(|task| format!("{} {}", checkbox(task.state), task.title))
            .collect::<Vec<_>>()
            .join("\n"),
        Outcome::TaskCreated { title, .. } => format!("Created task \"{title}\"."),
        Outcome::Task { task } => render_detail(task),
        Outcome::TaskStateChanged { title, state } => format!("Marked \"{title}\" as {state}."),
        Outcome::TaskDeleted { title } => format!("Deleted task \"{title}\"."),
        Outcome::Cancelled => "Cancelled.".to_string(),
    }
}

fn checkbox(state: TaskState) -> &'static str {
    if state.is_done() {
        "[x]"
    } else {
        "[ ]"
    }
}

fn render_detail(task: &TaskDetail) -> String {
    let mut out = format!(
        "{} {}\ncategory: {}\nstatus: {}",
        checkbox(task.state),
        task.title,
        task.category,
        task.state
    );
    match task.description.as_deref() {
        Some(description) if !description.is_empty() => {
            out.push_str("\n\n");
            out.push_str(description);
        }
        _ => {}
    }
    out
}
