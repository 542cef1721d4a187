//! Wires the catalog, store, persistence and terminal tasks together.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::dashboard::{dashboard_task, render, RenderOptions};
use crate::input::{input_task, InputEvent};
use crate::order::{OrderEvent, OrderStore};
use crate::persist::{persist_task, FileStore, KeyValueStore, MemoryStore, OrderPersistence};
use crate::random::random_bowl;
use crate::session::{Outcome, Session};
use crate::utils::category_counts;


// Durable file store, or memory only for ephemeral sessions
pub fn open_persistence(config: &Config) -> OrderPersistence {
    let store: Box<dyn KeyValueStore> = if config.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::new(&config.store_path))
    };
    OrderPersistence::new(store)
}


/// Build the store, rehydrate it once, and hook persistence up.
///
/// Returns the store plus the receiver the persistence task should drain.
/// A surprise seed replaces whatever was saved and is persisted right away.
pub fn bootstrap(
    catalog: Catalog,
    persistence: &OrderPersistence,
    surprise: Option<u64>,
) -> (OrderStore, mpsc::UnboundedReceiver<OrderEvent>) {
    let mut store = OrderStore::new(catalog);

    let saved = persistence.load();
    if !saved.is_empty() {
        store.replace(saved);
        info!(counts = ?category_counts(&store), "saved order restored");
    }

    let rx = store.subscribe();
    if let Some(seed) = surprise {
        let bowl = random_bowl(store.catalog(), seed);
        info!(seed, len = bowl.len(), "starting from a surprise bowl");
        store.replace(bowl);
    }
    (store, rx)
}


// The session plus how it is drawn
pub struct App {
    session: Session,
    options: RenderOptions,
}

impl App {
    pub fn new(session: Session, options: RenderOptions) -> Self {
        Self { session, options }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn frame(&self) -> String {
        render(&self.session, self.options)
    }

    /// Apply one input event. Returns false once the user quits.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            Ok(command) => match self.session.apply(command) {
                Ok(Outcome::Quit) => return false,
                Ok(outcome) => debug!(?command, ?outcome, "command applied"),
                Err(e) => debug!(?command, error = %e, "command rejected"),
            },
            Err(e) => self.session.set_status(e.to_string()),
        }
        true
    }
}


/// Run the interactive session until the user quits or stdin closes.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let catalog = Catalog::standard();
    let persistence = open_persistence(&config);
    let (store, order_rx) = bootstrap(catalog, &persistence, config.surprise);
    let persister = tokio::spawn(persist_task(order_rx, persistence));

    let (frame_tx, frame_rx) = mpsc::unbounded_channel::<String>();
    let dashboard = tokio::spawn(dashboard_task(frame_rx));

    let (input_tx, mut input_rx) = mpsc::channel::<InputEvent>(16);
    let reader = tokio::spawn(input_task(input_tx));

    let mut app = App::new(
        Session::new(store, config.portion_categories.clone()),
        config.render_options(),
    );
    let _ = frame_tx.send(app.frame());

    while let Some(event) = input_rx.recv().await {
        if !app.handle(event) {
            break;
        }
        if frame_tx.send(app.frame()).is_err() {
            break;
        }
    }

    // Dropping the store closes the persistence channel once queued saves land
    drop(app);
    drop(frame_tx);
    persister.await?;
    dashboard.await?;
    reader.abort();
    info!("session ended");
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use crate::input::Command;
    use crate::model::{Category, OrderLine, Portion};

    fn plain_app() -> App {
        let session = Session::new(OrderStore::new(Catalog::standard()), vec![Category::Salsa]);
        App::new(session, RenderOptions { color: false })
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = plain_app();
        assert!(app.handle(Ok(Command::Help)));
        assert!(app.session().status().unwrap().starts_with("<n> add menu item"));
        assert!(!app.handle(Ok(Command::Quit)));
    }

    #[test]
    fn parse_errors_become_status() {
        let mut app = plain_app();
        assert!(app.handle(Err(InputError::Unrecognized("guac".into()))));
        assert!(app.frame().contains("unrecognized command \"guac\""));
    }

    #[test]
    fn bootstrap_restores_a_saved_order_without_rewriting_it() {
        let catalog = Catalog::standard();
        let mut persistence = OrderPersistence::new(Box::new(MemoryStore::new()));
        let saved = vec![OrderLine::new(catalog.find(Category::Protein, "Veggie").unwrap(), Portion::Normal)];
        persistence.save(&saved).unwrap();

        let (store, mut rx) = bootstrap(catalog, &persistence, None);
        assert_eq!(store.lines(), saved.as_slice());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn bootstrap_surprise_replaces_and_publishes() {
        let catalog = Catalog::standard();
        let persistence = OrderPersistence::new(Box::new(MemoryStore::new()));
        let (store, mut rx) = bootstrap(catalog.clone(), &persistence, Some(3));
        assert_eq!(store.lines(), random_bowl(&catalog, 3).as_slice());
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn ephemeral_config_uses_memory() {
        let config = Config {
            ephemeral: true,
            store_path: "/nonexistent/dir/storage.json".into(),
            ..Config::default()
        };
        let mut persistence = open_persistence(&config);
        persistence.save(&[]).unwrap();
        assert!(persistence.load().is_empty());
    }
}
