mod command;
mod render;

use std::{
    env,
    io::{self, BufRead, Write},
    process,
    sync::Arc,
    thread,
};

use codewise_core::{
    carousel::{CarouselEvent, CarouselTicker},
    catalog::CourseCatalog,
    config::Config,
    error::Error,
    landing::Landing,
    store::{DocumentStore, FirestoreStore, StoreHandle},
};
use crossbeam_channel::{select, unbounded, Receiver};
use env_logger::{Builder, Env};

use crate::command::{Command, HELP};

const ENV_LOG: &str = "CODEWISE_LOG";
const ENV_LOG_STYLE: &str = "CODEWISE_LOG_STYLE";

fn main() {
    // Setup logging from the env variables, with defaults.
    Builder::from_env(
        Env::new()
            .filter_or(ENV_LOG, "info")
            .write_style(ENV_LOG_STYLE),
    )
    .init();

    let args: Vec<String> = env::args().collect();
    let mode = args.get(1).map(String::as_str).unwrap_or("admin");

    if let Err(err) = start(mode) {
        log::error!("{}", err);
        process::exit(1);
    }
}

fn start(mode: &str) -> Result<(), Error> {
    let config = Config::load()?;
    let store: StoreHandle = Arc::new(FirestoreStore::new(config.firestore()?));
    match mode {
        "admin" => admin(store, &config),
        "landing" => landing(store, &config),
        other => Err(Error::ConfigError(format!(
            "unknown mode {other:?}, expected \"admin\" or \"landing\""
        ))),
    }
}

fn admin(store: StoreHandle, config: &Config) -> Result<(), Error> {
    let mut catalog = CourseCatalog::with_config(store, config);
    let stdout = io::stdout();

    render::catalog(&catalog, &mut stdout.lock())?;
    // A failed load is already recorded in the catalog and rendered below.
    let _ = catalog.load();
    render::catalog(&catalog, &mut stdout.lock())?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(stdout.lock(), "{}", HELP)?,
            Ok(command) => {
                apply(&mut catalog, command);
                render::catalog(&catalog, &mut stdout.lock())?;
            }
            Err(msg) => writeln!(stdout.lock(), "{} (h for help)", msg)?,
        }
    }
    Ok(())
}

fn apply<S: DocumentStore>(catalog: &mut CourseCatalog<S>, command: Command) {
    // Failures are logged and kept as the catalog's last error.
    let _ = match command {
        Command::Search(term) => {
            catalog.set_search_term(&term);
            Ok(())
        }
        Command::NextPage => {
            catalog.next_page();
            Ok(())
        }
        Command::PreviousPage => {
            catalog.previous_page();
            Ok(())
        }
        Command::GoTo(page) => {
            if !catalog.set_page(page) {
                log::warn!("no page {}", page + 1);
            }
            Ok(())
        }
        Command::Delete(id) => catalog.request_delete(&id),
        Command::Edit(id) => match catalog.find(&id).cloned() {
            Some(course) => {
                catalog.request_edit(&course);
                Ok(())
            }
            None => {
                log::warn!("no course {}", id);
                Ok(())
            }
        },
        Command::Submit(draft) => catalog.submit_edit(&draft),
        Command::CancelEdit => {
            catalog.cancel_edit();
            Ok(())
        }
        Command::Create(draft) => catalog.create(&draft).map(|_| ()),
        Command::Reload => catalog.load(),
        Command::Help | Command::Quit => Ok(()),
    };
}

fn landing(store: StoreHandle, config: &Config) -> Result<(), Error> {
    let mut landing = Landing::new();
    let stdout = io::stdout();

    render::landing(&landing, &mut stdout.lock())?;
    landing.load(&store, &config.collection);
    render::landing(&landing, &mut stdout.lock())?;
    writeln!(stdout.lock(), "(< previous, > next, Enter to quit)")?;

    let (ticker, events) =
        CarouselTicker::spawn(landing.featured_count(), config.carousel_interval());
    let input = stdin_lines();

    loop {
        let step = select! {
            recv(events) -> event => Step::Rotated(event.ok()),
            recv(input) -> line => Step::Input(line.ok()),
        };
        match step {
            Step::Rotated(Some(CarouselEvent::Rotated { index })) => {
                landing.rotate_to(index);
                render::landing(&landing, &mut stdout.lock())?;
            }
            Step::Input(Some(line)) if line.trim() == "<" => ticker.previous(),
            Step::Input(Some(line)) if line.trim() == ">" => ticker.advance(),
            Step::Rotated(None) | Step::Input(_) => break,
        }
    }
    ticker.stop();
    Ok(())
}

enum Step {
    Rotated(Option<CarouselEvent>),
    Input(Option<String>),
}

/// Forward stdin lines from a reader thread, which stays blocked on stdin
/// until the process exits.
fn stdin_lines() -> Receiver<String> {
    let (send, recv) = unbounded();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if send.send(line).is_err() {
                break;
            }
        }
    });
    recv
}
