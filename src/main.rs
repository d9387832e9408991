use book_finder::cli::{open_rejection, parse_command, Command, HELP};
use book_finder::{CatalogApi, Config, HttpCatalog, SearchView};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

fn apply_command<C>(view: &mut SearchView<C>, command: Command) -> bool
where
    C: CatalogApi + Send + Sync + 'static,
{
    match command {
        Command::Search(text) => {
            view.edit_query(text);
            view.submit_search();
        }
        Command::Open(number) => match open_rejection(view.state(), number) {
            Some(reason) => {
                warn!("Ignoring /open {}: {}", number, reason);
                println!("{}", reason);
            }
            None => view.select_result(number - 1),
        },
        Command::Close => view.dismiss_detail(),
        Command::Retry => view.retry(),
        Command::Dismiss => view.dismiss_error(),
        Command::Help => println!("{}", HELP),
        Command::Invalid(message) => {
            println!("{}", message);
            println!("{}", HELP);
        }
        Command::Empty => {}
        Command::Quit => return false,
    }
    true
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    // Logs go to stderr so they stay out of the rendered view.
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let catalog = HttpCatalog::from_config(&config)?;
    info!("Using catalog backend at {}", catalog.base_url());

    let mut view = SearchView::new(Arc::new(catalog));
    if let Some(query) = config.initial_query() {
        view.edit_query(query);
        view.submit_search();
    }
    println!("{}", view.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !apply_command(&mut view, parse_command(&line)) {
                    break;
                }
                println!("{}", view.render());
            }
            applied = view.next_completion(), if view.has_pending() => {
                if applied {
                    println!("{}", view.render());
                }
            }
        }
    }

    info!("Exiting");
    Ok(())
}
