use crate::output::Output;
use crate::progress::Spinner;
use crate::render;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_core::{Controller, Event};
use popcorn_sources::MovieSource;
use serde_json::json;

pub async fn run_search<S: MovieSource + 'static>(
    mut app: Controller<S>,
    query: String,
    output: &Output,
) -> Result<()> {
    let label = format!("Searching for \"{}\"...", query);
    app.handle(Event::QueryChanged(query))?;
    if !app.is_busy() {
        output.warn(format!(
            "Type at least {} characters to search",
            app.options().min_query_len
        ));
        return Ok(());
    }

    let spinner = Spinner::start(label, output.shows_progress());
    app.settle().await?;
    spinner.finish();

    if let Some(message) = app.search_status().error() {
        return Err(eyre!("{}", message));
    }

    if output.is_human() {
        output.info(format!("Found {} results", app.results().len()));
        output.block(render::results_table(app.results()));
    } else {
        output.json(&json!({
            "query": app.query(),
            "source": app.source_name(),
            "results": app.results(),
        }));
    }

    Ok(())
}
