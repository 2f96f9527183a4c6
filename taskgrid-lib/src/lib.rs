//! Editable data-grid state
//!
//! `taskgrid-lib` holds the state behind a spreadsheet-like task table:
//! user-defined typed columns, rows of cells, row selection and drag
//! reordering. Tables can be hydrated from a remote sheet service and
//! saved as snapshots between sessions.
//!
//! # Example
//!
//! ```
//! use taskgrid_lib::drag::DragCoordinator;
//! use taskgrid_lib::model::{CellValue, ColumnDraft, ColumnType};
//! use taskgrid_lib::store::TableStore;
//!
//! let mut store = TableStore::new();
//! let title = store.add_column(ColumnDraft::new("Title", ColumnType::Text));
//! let first = store.add_row();
//! let second = store.add_row();
//! store.update_cell(&first, &title, CellValue::from("Write report")).unwrap();
//!
//! let mut drag = DragCoordinator::new();
//! drag.start(&mut store, &second).unwrap();
//! drag.drop_on(&mut store, &first).unwrap();
//! assert_eq!(store.rows()[0].id, second);
//! ```

pub mod client;
pub mod config;
pub mod drag;
pub mod error;
pub mod id;
pub mod model;
pub mod navigation;
pub mod normalize;
pub mod storage;
pub mod store;

pub use client::SheetClient;
pub use client::SheetRef;
pub use client::SheetSource;
pub use config::StoreConfig;
pub use config::Strictness;
pub use error::Error;
pub use store::TableStore;
