use slate::api::Api;
use slate::config::SlateConfig;
use slate::controller::{EditKind, InboxController, ProjectTasksController, ProjectsController};

/// Console walkthrough of the three list controllers against whichever
/// backend the config selects. With no config present this runs entirely
/// against the mock responder, which is the local development mode.
#[tokio::main]
async fn main() {
    // Log to the systemd user journal when available
    // (`journalctl --user -t slate -f`); absence of a journal is fine.
    if let Ok(journal) = systemd_journal_logger::JournalLog::new() {
        let _ = journal.with_syslog_identifier("slate".to_string()).install();
    }
    log::set_max_level(log::LevelFilter::Debug);

    let config = SlateConfig::load();
    let backend = match config.backend() {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Failed to set up backend: {}", e);
            return;
        }
    };
    let api = Api::new(backend);

    println!("=== Inbox ===");
    let mut inbox = InboxController::new(api.clone());
    inbox.load().await;
    for task in inbox.tasks() {
        println!("  [{}] {}", if task.done { "x" } else { " " }, task.name);
    }

    inbox.set_input("Capture something new");
    inbox.submit().await;
    println!("After capture: {} tasks", inbox.tasks().len());

    if let Some(first) = inbox.tasks().first() {
        let (id, done) = (first.id.clone(), first.done);
        inbox.toggle_done(&id, done).await;
        println!("After completing one: {} tasks", inbox.tasks().len());
    }

    println!("\n=== Projects ===");
    let mut projects = ProjectsController::new(api.clone());
    projects.load().await;
    for project in projects.projects() {
        println!("  {} ({})", project.name, project.id);
    }

    println!("\n=== Project tasks ===");
    let mut tasks = ProjectTasksController::new(api.clone());
    tasks.load().await;
    for project in tasks.grouped() {
        println!("  {}", project.name);
        for milestone in &project.milestones {
            if let Some(name) = &milestone.name {
                println!("    {}", name);
            }
            for task in &milestone.tasks {
                let marker = if task.done { "x" } else { " " };
                println!("      [{}] {}", marker, task.task_name);
            }
        }
    }

    if let Some(row) = tasks.rows().first() {
        let (id, name) = (row.project_id.clone(), row.project_name.clone());
        tasks.begin_edit(EditKind::Project, id, name.clone());
        tasks.set_pending(format!("{} (renamed)", name));
        tasks.commit_edit().await;
        println!(
            "\nAfter rename: {}",
            tasks
                .grouped()
                .first()
                .map(|p| p.name.clone())
                .unwrap_or_default()
        );
    }
}
