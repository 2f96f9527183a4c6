//! End-to-end table workflow: load a remote sheet, edit it, drag rows, save
//! it and bring it back in a fresh workspace.

use async_trait::async_trait;
use serde_json::Value as Json;
use serde_json::json;

use taskgrid_lib::client::{SheetRef, SheetSource};
use taskgrid_lib::drag::DragCoordinator;
use taskgrid_lib::error::ApiError;
use taskgrid_lib::model::{CellValue, ColumnDraft, ColumnId, ColumnType, RowId};
use taskgrid_lib::navigation::{Route, Workspace};
use taskgrid_lib::storage::{SnapshotStorage, SqliteBackend};
use taskgrid_lib::store::{FetchOutcome, FetchStatus};

struct StaticSheet(Json);

#[async_trait]
impl SheetSource for StaticSheet {
    async fn fetch_sheet(&self, _sheet: SheetRef) -> Result<Json, ApiError> {
        Ok(self.0.clone())
    }
}

struct Offline;

#[async_trait]
impl SheetSource for Offline {
    async fn fetch_sheet(&self, _sheet: SheetRef) -> Result<Json, ApiError> {
        Err(ApiError::http(502, "Failed to fetch sheet data."))
    }
}

fn sheet() -> Json {
    json!({
        "data": [{
            "name": "Hotwash",
            "rows": [
                {"type": "header", "columns": [
                    {"id": 1, "name": "Task", "column_type": "fixed", "column_index": 0},
                    {"id": 2, "name": "State", "column_type": "dropdown", "column_index": 1}
                ]},
                {"type": "data", "id": 1, "row_index": 0, "columns": [
                    {"column_index": 0, "cell_data": "Plan"},
                    {"column_index": 1, "column_type": "dropdown",
                     "cell_data": {"status_text": "Done", "status_color": "#00ff00", "id": 1}}
                ]},
                {"type": "data", "id": 2, "row_index": 1, "columns": [
                    {"column_index": 0, "cell_data": "Build"},
                    {"column_index": 1, "column_type": "dropdown",
                     "cell_data": {"status_text": "Open", "id": 2}}
                ]},
                {"type": "data", "id": 3, "row_index": 2, "columns": [
                    {"column_index": 0, "cell_data": "Ship"}
                ]}
            ]
        }]
    })
}

fn row_order(workspace: &Workspace, route: Route) -> Vec<String> {
    workspace
        .page(route)
        .rows()
        .iter()
        .map(|row| row.id.to_string())
        .collect()
}

#[tokio::test]
async fn test_load_edit_save_restore() {
    let storage = SnapshotStorage::new(SqliteBackend::open_in_memory().await.unwrap());
    let mut workspace = Workspace::default();
    workspace.navigate(Route::Task1);

    let outcome = workspace
        .current_mut()
        .refresh(&StaticSheet(sheet()), SheetRef::new(86, 158))
        .await
        .unwrap();
    assert_eq!(outcome, FetchOutcome::Loaded);
    assert_eq!(workspace.current().sheet_name(), Some("Hotwash"));
    assert_eq!(row_order(&workspace, Route::Task1), ["row_1", "row_2", "row_3"]);

    let store = workspace.current_mut();
    let state = ColumnId::from("col_2");
    assert_eq!(store.column(&state).unwrap().options.len(), 2);

    let notes = store.add_column(ColumnDraft::new("Notes", ColumnType::Text));
    assert_eq!(store.columns()[0].id, notes);
    store
        .update_cell(&RowId::from("row_3"), &notes, CellValue::from("needs review"))
        .unwrap();

    store.select_rows(&[RowId::from("row_3"), RowId::from("row_2")]).unwrap();
    let mut drag = DragCoordinator::new();
    drag.start(store, &RowId::from("row_3")).unwrap();
    assert_eq!(
        drag.state().dragged(),
        &[RowId::from("row_3"), RowId::from("row_2")]
    );
    drag.drop_on(store, &RowId::from("row_1")).unwrap();
    assert_eq!(row_order(&workspace, Route::Task1), ["row_3", "row_2", "row_1"]);

    storage
        .save_table(Route::Task1, &workspace.page(Route::Task1).snapshot())
        .await
        .unwrap();

    let mut restored = Workspace::default();
    for route in storage.saved_routes().await.unwrap() {
        if let Some(snapshot) = storage.load_table(route).await.unwrap() {
            restored.page_mut(route).restore(snapshot);
        }
    }

    assert_eq!(row_order(&restored, Route::Task1), ["row_3", "row_2", "row_1"]);
    assert!(restored.page(Route::Task).rows().is_empty());
    let page = restored.page(Route::Task1);
    assert!(page.selection().is_empty());
    assert_eq!(
        page.row(&RowId::from("row_3")).unwrap().get(&notes),
        Some(&CellValue::from("needs review"))
    );
    assert_eq!(page.columns(), workspace.page(Route::Task1).columns());
}

#[tokio::test]
async fn test_failed_fetch_keeps_restored_table() {
    let mut workspace = Workspace::default();
    let store = workspace.current_mut();
    store
        .refresh(&StaticSheet(sheet()), SheetRef::new(1, 1))
        .await
        .unwrap();
    let before = store.snapshot();

    let outcome = store.refresh(&Offline, SheetRef::new(1, 1)).await.unwrap();

    assert_eq!(
        outcome,
        FetchOutcome::Failed("HTTP 502: Failed to fetch sheet data.".to_string())
    );
    assert_eq!(
        store.fetch_status(),
        &FetchStatus::Error("HTTP 502: Failed to fetch sheet data.".to_string())
    );
    assert_eq!(store.snapshot(), before);
}
