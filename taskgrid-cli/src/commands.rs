//! Command execution against a saved workspace.

use std::time::Duration;

use log::{debug, info};
use taskgrid_lib::client::{SheetClient, SheetRef};
use taskgrid_lib::config::StoreConfig;
use taskgrid_lib::drag::DragCoordinator;
use taskgrid_lib::model::{ColumnDraft, ColumnId, RowId};
use taskgrid_lib::navigation::{Route, Workspace};
use taskgrid_lib::storage::SnapshotStorage;
use taskgrid_lib::store::{FetchOutcome, TableStore};

use crate::cli::{Command, SyncArgs};
use crate::error::CliError;
use crate::input::{parse_cell, parse_options};
use crate::render::print_workspace;

/// One invocation's view of the saved workspace.
///
/// Only the active page is loaded. Its table is written back on
/// [`Session::save`] when any command changed it. The selection starts from
/// the `--select` rows and is never saved.
pub struct Session {
    storage: SnapshotStorage,
    workspace: Workspace,
    loaded_revision: u64,
}

impl Session {
    pub async fn open(
        storage: SnapshotStorage,
        config: StoreConfig,
        route: Route,
        selection: &[RowId],
    ) -> Result<Self, CliError> {
        let mut workspace = Workspace::new(config);
        workspace.navigate(route);

        if let Some(snapshot) = storage.load_table(route).await? {
            workspace.current_mut().restore(snapshot);
        }
        if !selection.is_empty() {
            workspace.current_mut().select_rows(selection)?;
        }

        let loaded_revision = workspace.current().revision();
        Ok(Self {
            storage,
            workspace,
            loaded_revision,
        })
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    fn store(&mut self) -> &mut TableStore {
        self.workspace.current_mut()
    }

    /// Writes the active page back if it changed.
    pub async fn save(&mut self) -> Result<(), CliError> {
        let route = self.workspace.active_route();
        let store = self.workspace.current();
        if store.revision() == self.loaded_revision {
            debug!("{} unchanged, not saving", route.path());
            return Ok(());
        }

        self.storage.save_table(route, &store.snapshot()).await?;
        self.loaded_revision = store.revision();
        info!("Saved {}", route.path());
        Ok(())
    }
}

/// Runs one command against the active page.
pub async fn execute(session: &mut Session, command: Command) -> Result<(), CliError> {
    match command {
        Command::Sync(args) => sync(session, args).await?,
        Command::Show => {}
        Command::AddColumn {
            name,
            kind,
            options,
        } => {
            let id = session
                .store()
                .add_column(ColumnDraft::new(name, kind).options(parse_options(&options)));
            println!("Added column {}", id);
        }
        Command::EditColumn {
            id,
            name,
            kind,
            options,
        } => {
            let id = ColumnId::from(id);
            let store = session.store();
            let draft = match store.column(&id) {
                Some(column) => ColumnDraft {
                    name: name.unwrap_or_else(|| column.name.clone()),
                    kind: kind.unwrap_or(column.kind),
                    options: if options.is_empty() {
                        column.options.clone()
                    } else {
                        parse_options(&options)
                    },
                },
                None => ColumnDraft::default(),
            };
            store.update_column(&id, draft)?;
        }
        Command::DeleteColumn { id } => session.store().delete_column(&ColumnId::from(id))?,
        Command::MoveColumn { from, to } => session.store().reorder_columns(from, to)?,
        Command::AddRow => {
            let id = session.store().add_row();
            println!("Added row {}", id);
        }
        Command::DeleteRow { id } => session.store().delete_row(&RowId::from(id))?,
        Command::SetCell {
            row,
            column,
            values,
        } => {
            let row = RowId::from(row);
            let column = ColumnId::from(column);
            let store = session.store();
            let value = match store.column(&column) {
                Some(target) => parse_cell(target, &values)?,
                None => Default::default(),
            };
            store.update_cell(&row, &column, value)?;
        }
        Command::Select { rows } => {
            let store = session.store();
            for id in rows {
                store.select_row(&RowId::from(id))?;
            }
        }
        Command::SelectAll => session.store().select_all_rows(),
        Command::DeleteSelected => session.store().delete_selected_rows(),
        Command::Drag { row, onto } => {
            let store = session.store();
            let mut drag = DragCoordinator::new();
            drag.start(store, &RowId::from(row))?;
            drag.drop_on(store, &RowId::from(onto))?;
        }
        Command::Clear { rows_only } => {
            if rows_only {
                session.store().clear_rows();
            } else {
                session.store().clear_table();
            }
        }
    }
    Ok(())
}

async fn sync(session: &mut Session, args: SyncArgs) -> Result<(), CliError> {
    let mut builder = SheetClient::builder().timeout(Duration::from_secs(args.timeout));
    if let Some(url) = args.base_url {
        builder = builder.base_url(url);
    }
    let client = builder.build()?;
    let sheet = SheetRef::new(args.project, args.schedule);

    match session.store().refresh(&client, sheet).await? {
        FetchOutcome::Loaded => println!("Loaded sheet {}", sheet),
        FetchOutcome::AlreadyLoading => println!("A sync is already running"),
        FetchOutcome::Failed(message) => return Err(CliError::Sync(message)),
    }
    Ok(())
}

/// Prints the active page.
pub fn show(session: &Session) {
    print_workspace(session.workspace());
}
