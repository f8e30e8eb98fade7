use crate::commands::prompts;
use crate::output::Output;
use crate::progress::{self, Spinner};
use crate::render;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use popcorn_core::{Controller, CoreError, Event};
use popcorn_sources::MovieSource;

const MENU: [&str; 3] = ["Search movies", "Watched list", "Quit"];

/// Interactive loop over a single controller. The watched list lives as long
/// as the loop does.
pub async fn run_browse<S: MovieSource + 'static>(mut app: Controller<S>, output: &Output) -> Result<()> {
    if !progress::is_interactive() || !output.is_human() {
        return Err(eyre!(
            "browse needs an interactive terminal; use 'popcorn search' or 'popcorn show' instead"
        ));
    }

    loop {
        println!();
        println!("{}", app.window_title().bright_cyan().bold());
        println!("{}", render::summary_line(&app.summary()));

        match prompts::prompt_select("What next?", &MENU, 0)? {
            0 => search_flow(&mut app, output).await?,
            1 => watched_flow(&mut app, output)?,
            _ => break,
        }
    }

    Ok(())
}

async fn search_flow<S: MovieSource + 'static>(app: &mut Controller<S>, output: &Output) -> Result<()> {
    let current = app.query().to_string();
    let query = prompts::prompt_string("Search movies", Some(&current))?;

    app.handle(Event::QueryChanged(query.clone()))?;
    if !app.is_busy() {
        output.warn(format!(
            "Type at least {} characters to search",
            app.options().min_query_len
        ));
        return Ok(());
    }

    let spinner = Spinner::start(format!("Searching for \"{}\"...", query), output.shows_progress());
    app.settle().await?;
    spinner.finish();

    if let Some(message) = app.search_status().error() {
        output.error(message);
        return Ok(());
    }
    output.info(format!("Found {} results", app.results().len()));

    loop {
        let mut items: Vec<String> = app
            .results()
            .iter()
            .map(|r| {
                let mark = if app.watched().get(&r.imdb_id).is_some() { " ✓" } else { "" };
                format!("{} ({}){}", r.title, r.year, mark)
            })
            .collect();
        items.push("Back".to_string());

        let pick = prompts::prompt_select("Select a movie", &items, 0)?;
        let Some(result) = app.results().get(pick) else {
            break;
        };
        let imdb_id = result.imdb_id.clone();

        let spinner = Spinner::start("Loading details...", output.shows_progress());
        app.handle(Event::SelectionChanged(Some(imdb_id)))?;
        app.settle().await?;
        spinner.finish();

        detail_flow(app, output)?;
    }

    Ok(())
}

fn detail_flow<S: MovieSource + 'static>(app: &mut Controller<S>, output: &Output) -> Result<()> {
    if let Some(message) = app.detail_status().error() {
        output.error(message);
        app.handle(Event::SelectionChanged(None))?;
        return Ok(());
    }
    let Some(detail) = app.detail() else {
        return Ok(());
    };

    println!();
    println!("{}", app.window_title().bright_cyan().bold());
    output.block(render::detail_table(detail));

    let max = app.options().max_rating;
    let previous = app.pending_rating();
    if previous > 0 {
        output.info(format!("You rated this movie {} {}", previous, "⭐".yellow()));
    }
    output.info(render::stars(app.rating_input()));

    let rating = prompts::prompt_number_in_range(
        &format!("Your rating (1-{}, 0 to close)", max),
        Some(u32::from(previous)),
        0..=u32::from(max),
        output,
    )?;
    // prompt_number_in_range keeps the value inside 0..=max
    let rating = u8::try_from(rating).unwrap_or(0);

    if rating == 0 {
        app.handle(Event::SelectionChanged(None))?;
        return Ok(());
    }

    // Clicking the current rating again would clear it
    if rating != app.pending_rating() {
        app.handle(Event::RatingHovered(rating))?;
        app.handle(Event::RatingClicked(rating))?;
    }
    output.info(render::stars(app.rating_input()));

    if !prompts::prompt_yes_no("Add to watched list?", Some(true))? {
        app.handle(Event::SelectionChanged(None))?;
        return Ok(());
    }

    let title = app.detail().map(|d| d.title.clone()).unwrap_or_default();
    match app.handle(Event::EntryCommitted) {
        Ok(()) => output.success(format!("Added {} to your watched list", title)),
        Err(CoreError::Unrated) => output.warn("Pick a rating first"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn watched_flow<S: MovieSource + 'static>(app: &mut Controller<S>, output: &Output) -> Result<()> {
    loop {
        if app.watched().is_empty() {
            output.info("You have not rated any movies yet");
            return Ok(());
        }

        println!("{}", render::summary_line(&app.summary()));
        output.block(render::watched_table(app.watched().entries()));

        let mut items: Vec<String> = app
            .watched()
            .entries()
            .iter()
            .map(|e| format!("Delete {} ({})", e.title, e.year))
            .collect();
        items.push("Back".to_string());

        let pick = prompts::prompt_select("Manage watched list", &items, items.len() - 1)?;
        let Some(entry) = app.watched().entries().get(pick) else {
            return Ok(());
        };
        let (imdb_id, title) = (entry.imdb_id.clone(), entry.title.clone());

        if prompts::prompt_yes_no(&format!("Remove {}?", title), Some(false))? {
            app.handle(Event::EntryDeleted(imdb_id))?;
            output.success(format!("Removed {}", title));
        }
    }
}
