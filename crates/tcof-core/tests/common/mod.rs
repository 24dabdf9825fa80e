use tcof_core::{Toolkit, ToolkitBuilder};
use tempfile::TempDir;

/// Helper function to create a test toolkit
pub async fn create_test_toolkit() -> (TempDir, Toolkit) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let toolkit = ToolkitBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create toolkit");
    (temp_dir, toolkit)
}
