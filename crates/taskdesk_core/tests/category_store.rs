use rusqlite::Connection;
use taskdesk_core::db::migrations::latest_version;
use taskdesk_core::db::open_db_in_memory;
use taskdesk_core::{
    CategoryRepository, CategoryService, Entity, NewTask, RepoError, SqliteCategoryRepository,
    SqliteTaskRepository, TaskListQuery, TaskRepository, TitleError,
};

#[test]
fn created_category_is_listed_exactly_once() {
    let conn = open_db_in_memory().unwrap();
    let service = CategoryService::new(SqliteCategoryRepository::try_new(&conn).unwrap());

    let created = service.create_category("Work").unwrap();
    assert_eq!(created.title, "Work");

    let categories = service.list_categories().unwrap();
    assert_eq!(
        categories
            .iter()
            .filter(|category| category.title == "Work")
            .count(),
        1
    );
}

#[test]
fn list_keeps_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();

    for title in ["Work", "Home", "Errands"] {
        repo.create_category(title).unwrap();
    }

    let titles: Vec<_> = repo
        .list_categories()
        .unwrap()
        .into_iter()
        .map(|category| category.title)
        .collect();
    assert_eq!(titles, vec!["Work", "Home", "Errands"]);
}

#[test]
fn duplicate_title_fails_and_leaves_count_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();

    repo.create_category("Work").unwrap();
    let err = repo.create_category("Work").unwrap_err();
    assert!(matches!(
        err,
        RepoError::DuplicateTitle { entity: Entity::Category, ref title } if title == "Work"
    ));

    assert_eq!(repo.list_categories().unwrap().len(), 1);
}

#[test]
fn blank_title_is_rejected_before_insert() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();

    let err = repo.create_category("   ").unwrap_err();
    assert!(matches!(err, RepoError::Validation(TitleError::Empty)));
    assert!(repo.list_categories().unwrap().is_empty());
}

#[test]
fn titles_are_trimmed_on_create_and_lookup() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();

    let created = repo.create_category("  Work ").unwrap();
    assert_eq!(created.title, "Work");
    assert_eq!(repo.find_category(" Work").unwrap().unwrap().id, created.id);
}

#[test]
fn find_category_prefers_exact_title_over_trimmed() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO categories (title) VALUES ('Work');
         INSERT INTO categories (title) VALUES ('Work ');",
    )
    .unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();

    assert_eq!(repo.find_category("Work ").unwrap().unwrap().title, "Work ");
    assert_eq!(repo.find_category("Work").unwrap().unwrap().title, "Work");
    assert_eq!(repo.find_category(" Work").unwrap().unwrap().title, "Work");
    assert!(repo.find_category("Nowhere").unwrap().is_none());

    assert_eq!(repo.delete_category("Work ").unwrap(), 1);
    let titles: Vec<_> = repo
        .list_categories()
        .unwrap()
        .into_iter()
        .map(|category| category.title)
        .collect();
    assert_eq!(titles, vec!["Work"]);
}

#[test]
fn deleting_missing_category_is_silent_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();
    repo.create_category("Work").unwrap();

    assert_eq!(repo.delete_category("Nowhere").unwrap(), 0);
    assert_eq!(repo.list_categories().unwrap().len(), 1);
}

#[test]
fn deleting_category_cascades_to_its_tasks_only() {
    let conn = open_db_in_memory().unwrap();
    let categories = SqliteCategoryRepository::try_new(&conn).unwrap();
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();

    categories.create_category("Work").unwrap();
    categories.create_category("Home").unwrap();
    tasks
        .create_task(&NewTask::new("Report", "Q3 numbers", "Work"))
        .unwrap();
    tasks
        .create_task(&NewTask::new("Slides", "", "Work"))
        .unwrap();
    tasks
        .create_task(&NewTask::new("Laundry", "", "Home"))
        .unwrap();

    assert_eq!(categories.delete_category("Work").unwrap(), 1);

    let remaining: Vec<_> = tasks
        .list_tasks(&TaskListQuery::default())
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(remaining, vec!["Laundry"]);

    let orphans: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM tasks
             WHERE category_id NOT IN (SELECT id FROM categories);",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteCategoryRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_tasks_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE categories (id INTEGER PRIMARY KEY, title TEXT NOT NULL UNIQUE);
         PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();

    assert!(matches!(
        SqliteCategoryRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("tasks"))
    ));
}

#[test]
fn repository_rejects_connection_with_foreign_keys_off() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();

    assert!(matches!(
        SqliteCategoryRepository::try_new(&conn),
        Err(RepoError::ForeignKeysDisabled)
    ));
}
