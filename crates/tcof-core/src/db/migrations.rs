//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result, ToolkitError};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        // Execute the schema SQL
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        // Apply migrations for existing databases
        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Check if framework_tasks column exists in stage_data table
        let has_framework_tasks: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('stage_data') WHERE name = 'framework_tasks'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .unwrap_or(false);

        // Add framework_tasks column if it doesn't exist
        if !has_framework_tasks {
            self.connection
                .execute(
                    "ALTER TABLE stage_data ADD COLUMN framework_tasks TEXT NOT NULL DEFAULT '[]'",
                    [],
                )
                .map_err(|e| {
                    ToolkitError::database(
                        "Failed to add framework_tasks column to stage_data table",
                        e,
                    )
                })?;
        }

        Ok(())
    }
}
