use crate::output::Output;
use crate::progress::Spinner;
use crate::render;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_core::{Controller, Event};
use popcorn_sources::MovieSource;
use serde_json::json;

pub async fn run_show<S: MovieSource + 'static>(
    mut app: Controller<S>,
    imdb_id: String,
    output: &Output,
) -> Result<()> {
    let spinner = Spinner::start(format!("Loading {}...", imdb_id), output.shows_progress());
    app.handle(Event::SelectionChanged(Some(imdb_id.clone())))?;
    app.settle().await?;
    spinner.finish();

    if let Some(message) = app.detail_status().error() {
        return Err(eyre!("{}: {}", message, imdb_id));
    }

    let detail = app
        .detail()
        .ok_or_else(|| eyre!("No details returned for {}", imdb_id))?;

    if output.is_human() {
        output.info(app.window_title());
        output.block(render::detail_table(detail));
    } else {
        output.json(&json!({
            "movie": detail,
            "runtime_minutes": detail.runtime_minutes(),
        }));
    }

    Ok(())
}
