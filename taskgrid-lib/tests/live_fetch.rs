//! Live test against the sheet service.
//!
//! Ignored by default. To run it, create a `.env` file in the taskgrid-lib
//! directory with:
//!
//! ```env
//! TASKGRID_PROJECT_ID=86
//! TASKGRID_SCHEDULE_ID=158
//! # Optional, defaults to the public endpoint
//! TASKGRID_BASE_URL=https://schedule.msarii.com/hotwash/whole-sheet-data
//! ```
//!
//! Then run: `cargo test -p taskgrid-lib -- --ignored`

use std::env;
use std::time::Duration;

use taskgrid_lib::client::{SheetClient, SheetRef};
use taskgrid_lib::normalize::normalize;
use taskgrid_lib::Strictness;

fn load_env() -> Option<(SheetRef, Option<String>)> {
    let _ = dotenvy::dotenv();

    let project_id = env::var("TASKGRID_PROJECT_ID").ok()?.parse().ok()?;
    let schedule_id = env::var("TASKGRID_SCHEDULE_ID").ok()?.parse().ok()?;
    let base_url = env::var("TASKGRID_BASE_URL").ok();

    Some((SheetRef::new(project_id, schedule_id), base_url))
}

#[tokio::test]
#[ignore]
async fn test_live_fetch_normalizes() {
    let (sheet, base_url) = load_env().expect("TASKGRID_PROJECT_ID and TASKGRID_SCHEDULE_ID must be set");

    let mut builder = SheetClient::builder().timeout(Duration::from_secs(30));
    if let Some(url) = base_url {
        builder = builder.base_url(url);
    }
    let client = builder.build().expect("Failed to build client");

    let payload = client.fetch(sheet).await.expect("Failed to fetch sheet");
    let normalized = normalize(&payload, Strictness::Strict).expect("Sheet should normalize");

    println!(
        "Fetched {:?}: {} columns, {} rows",
        normalized.name,
        normalized.columns.len(),
        normalized.rows.len()
    );
}
