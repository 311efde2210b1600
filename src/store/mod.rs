//! Durable storage for schedule events.
//!
//! `EventStore` owns the SQLite pool and is the only type that touches the
//! `events` table. Schema constraints live in `migrations/`; the CHECK on
//! the `type` column means an unknown event type is rejected here, at the
//! store boundary, whatever the caller validated.

use std::str::FromStr;

use chrono::Utc;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::models::{Event, EventFields};

static MIGRATOR: Migrator = sqlx::migrate!();

const SELECT_COLUMNS: &str =
    "SELECT id, name, time, location, organizer, type, day, created_at, updated_at FROM events";

/// Demo schedule used by the seed routine: three conference days with five
/// sessions each.
const DEMO_EVENTS: &[(&str, &str, &str, &str, &str, i64)] = &[
    ("Registrations Open", "09:00", "Hotel Lobby", "Maddie", "workshop", 1),
    ("Keynote: Future of Surgery", "10:30", "Auditorium", "Avriel", "speaker", 1),
    ("Laparoscopic Skills Lab", "14:00", "Room 301", "Maria", "workshop", 1),
    ("Research Presentation", "15:30", "Conference Room A", "Nadia", "speaker", 1),
    ("Suturing Workshop", "16:45", "Room 301", "Yusef", "workshop", 1),
    ("Trauma Surgery Workshop", "09:00", "Main Hall", "Angela", "workshop", 2),
    ("Plenary: Innovation in Medicine", "10:30", "Auditorium", "Brandon", "speaker", 2),
    ("Microsurgery Techniques", "14:00", "Room 301", "Brieanna", "workshop", 2),
    ("Case Study Discussion", "15:30", "Conference Room B", "Catherine", "speaker", 2),
    ("Emergency Procedures", "16:45", "Room 301", "Daniel", "workshop", 2),
    ("Cardiovascular Surgery", "09:00", "Main Hall", "Gihwan", "workshop", 3),
    ("Surgical Innovation Panel", "10:30", "Auditorium", "Hemani", "speaker", 3),
    ("Robotic Surgery Demo", "14:00", "Room 301", "Hita", "workshop", 3),
    ("Research Symposium", "15:30", "Conference Room A", "Ishan", "speaker", 3),
    ("Closing Ceremony", "16:45", "Main Hall", "Issy", "speaker", 3),
];

#[derive(Clone)]
pub struct EventStore {
    pool: SqlitePool,
}

impl EventStore {
    /// Open (creating if missing) the database at `database_url`.
    pub async fn connect(database_url: &str) -> sqlx::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = if database_url.contains(":memory:") {
            // An in-memory SQLite database lives and dies with its
            // connection, so pin the pool to one connection and never
            // recycle it.
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        Ok(Self { pool })
    }

    /// Run the embedded migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        MIGRATOR.run(&self.pool).await
    }

    /// Insert a new event; both timestamps get the same instant so a fresh
    /// row always has `created_at == updated_at`. Returns the assigned id.
    pub async fn create(&self, fields: &EventFields) -> sqlx::Result<i64> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO events (name, time, location, organizer, type, day, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.time)
        .bind(&fields.location)
        .bind(&fields.organizer)
        .bind(&fields.kind)
        .bind(fields.day)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get(&self, id: i64) -> sqlx::Result<Option<Event>> {
        sqlx::query_as::<_, Event>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// All events, or one day's, ordered by day then by time. `time` is an
    /// `HH:MM` string, so the lexical TEXT ordering is chronological.
    pub async fn list(&self, day: Option<i64>) -> sqlx::Result<Vec<Event>> {
        match day {
            Some(day) => {
                sqlx::query_as::<_, Event>(&format!(
                    "{SELECT_COLUMNS} WHERE day = ? ORDER BY day, time"
                ))
                .bind(day)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Event>(&format!("{SELECT_COLUMNS} ORDER BY day, time"))
                    .fetch_all(&self.pool)
                    .await
            }
        }
    }

    /// Replace all six business fields and refresh `updated_at`. Returns the
    /// number of rows changed: 0 for an unknown id, which is not an error.
    pub async fn update(&self, id: i64, fields: &EventFields) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET name = ?, time = ?, location = ?, organizer = ?, type = ?, day = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.time)
        .bind(&fields.location)
        .bind(&fields.organizer)
        .bind(&fields.kind)
        .bind(fields.day)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Remove a row. Returns the number of rows changed: 0 for an unknown id.
    pub async fn delete(&self, id: i64) -> sqlx::Result<u64> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Wipe the table and repopulate it with the fixed demo schedule.
    pub async fn seed_demo(&self) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM events").execute(&self.pool).await?;

        for &(name, time, location, organizer, kind, day) in DEMO_EVENTS {
            self.create(&EventFields {
                name: name.to_string(),
                time: time.to_string(),
                location: location.to_string(),
                organizer: organizer.to_string(),
                kind: kind.to_string(),
                day,
            })
            .await?;
        }

        Ok(())
    }

    /// Close the pool; called once on shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;

    async fn memory_store() -> EventStore {
        let store = EventStore::connect("sqlite::memory:").await.unwrap();
        store.migrate().await.unwrap();
        store
    }

    fn fields(name: &str, time: &str, day: i64) -> EventFields {
        EventFields {
            name: name.to_string(),
            time: time.to_string(),
            location: "Main Hall".to_string(),
            organizer: "Dana".to_string(),
            kind: "workshop".to_string(),
            day,
        }
    }

    async fn count(store: &EventStore) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&store.pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids_and_equal_timestamps() {
        let store = memory_store().await;

        let a = store.create(&fields("Opening", "09:00", 1)).await.unwrap();
        let b = store.create(&fields("Keynote", "10:30", 1)).await.unwrap();
        assert_ne!(a, b);

        let event = store.get(a).await.unwrap().unwrap();
        assert_eq!(event.id, a);
        assert_eq!(event.name, "Opening");
        assert_eq!(event.kind, EventType::Workshop);
        assert_eq!(event.created_at, event.updated_at);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = memory_store().await;

        let a = store.create(&fields("Opening", "09:00", 1)).await.unwrap();
        assert_eq!(store.delete(a).await.unwrap(), 1);

        let b = store.create(&fields("Opening", "09:00", 1)).await.unwrap();
        assert!(b > a);
    }

    #[tokio::test]
    async fn list_orders_by_day_then_time_regardless_of_insertion() {
        let store = memory_store().await;

        store.create(&fields("D2 late", "15:00", 2)).await.unwrap();
        store.create(&fields("D1 late", "15:30", 1)).await.unwrap();
        store.create(&fields("D3 early", "08:00", 3)).await.unwrap();
        store.create(&fields("D1 early", "09:00", 1)).await.unwrap();
        store.create(&fields("D2 early", "08:30", 2)).await.unwrap();

        let events = store.list(None).await.unwrap();
        let order: Vec<(i64, &str)> = events.iter().map(|e| (e.day, e.time.as_str())).collect();
        assert_eq!(
            order,
            vec![
                (1, "09:00"),
                (1, "15:30"),
                (2, "08:30"),
                (2, "15:00"),
                (3, "08:00"),
            ]
        );
    }

    #[tokio::test]
    async fn list_filters_by_day() {
        let store = memory_store().await;

        store.create(&fields("D1", "09:00", 1)).await.unwrap();
        store.create(&fields("D2 a", "09:00", 2)).await.unwrap();
        store.create(&fields("D2 b", "11:00", 2)).await.unwrap();

        let day_two = store.list(Some(2)).await.unwrap();
        assert_eq!(day_two.len(), 2);
        assert!(day_two.iter().all(|e| e.day == 2));

        assert!(store.list(Some(7)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_fields_and_refreshes_updated_at() {
        let store = memory_store().await;

        let id = store.create(&fields("Opening", "09:00", 1)).await.unwrap();
        let before = store.get(id).await.unwrap().unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let mut changed = fields("Opening moved", "09:30", 1);
        changed.kind = "speaker".to_string();
        assert_eq!(store.update(id, &changed).await.unwrap(), 1);

        let after = store.get(id).await.unwrap().unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.name, "Opening moved");
        assert_eq!(after.time, "09:30");
        assert_eq!(after.kind, EventType::Speaker);
    }

    #[tokio::test]
    async fn update_of_missing_id_reports_zero_changes() {
        let store = memory_store().await;
        assert_eq!(store.update(999, &fields("X", "09:00", 1)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        let store = memory_store().await;

        let a = store.create(&fields("A", "09:00", 1)).await.unwrap();
        let b = store.create(&fields("B", "10:00", 1)).await.unwrap();

        assert_eq!(store.delete(a).await.unwrap(), 1);
        assert!(store.get(a).await.unwrap().is_none());
        assert!(store.get(b).await.unwrap().is_some());

        assert_eq!(store.delete(a).await.unwrap(), 0);
        assert_eq!(count(&store).await, 1);
    }

    #[tokio::test]
    async fn rejects_unknown_event_type_without_persisting() {
        let store = memory_store().await;

        let mut bad = fields("Mystery", "09:00", 1);
        bad.kind = "banquet".to_string();

        let err = store.create(&bad).await.unwrap_err();
        assert!(matches!(err, sqlx::Error::Database(_)));
        assert_eq!(count(&store).await, 0);
    }

    #[tokio::test]
    async fn seed_demo_resets_to_the_fixed_schedule() {
        let store = memory_store().await;

        store.create(&fields("Stray", "23:00", 9)).await.unwrap();
        store.seed_demo().await.unwrap();

        let events = store.list(None).await.unwrap();
        assert_eq!(events.len(), 15);
        for day in 1..=3 {
            assert_eq!(events.iter().filter(|e| e.day == day).count(), 5);
        }
        assert!(events.iter().all(|e| e.day != 9));

        // Seeding again replaces rather than appends.
        store.seed_demo().await.unwrap();
        assert_eq!(count(&store).await, 15);
    }
}
