//! Turns user commands into order mutations.
//!
//! The only state besides the order itself is whether the portion modal is
//! open, and for which ingredient.

use tracing::{debug, info};

use crate::error::SessionError;
use crate::input::Command;
use crate::model::{Category, Ingredient, Portion};
use crate::order::OrderStore;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    ChoosingPortion {
        category: Category,
        item: &'static Ingredient,
    },
}


// What a command did, for the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(String),
    Removed(String),
    AwaitingPortion(&'static str),
    Cancelled,
    Reset,
    Help,
    Quit,
    Unchanged,
}

impl Outcome {
    pub fn message(&self) -> Option<String> {
        match self {
            Outcome::Added(name) => Some(format!("Added {name}")),
            Outcome::Removed(name) => Some(format!("Removed {name}")),
            Outcome::AwaitingPortion(name) => Some(format!("How much {name}?")),
            Outcome::Cancelled => Some("Cancelled".to_string()),
            Outcome::Reset => Some("Started a new bowl".to_string()),
            Outcome::Help => Some(HELP.to_string()),
            Outcome::Quit | Outcome::Unchanged => None,
        }
    }
}

pub const HELP: &str =
    "<n> add menu item  x<n> remove order line  l/n/h pick portion  c cancel  reset  q quit";


pub struct Session {
    store: OrderStore,
    mode: Mode,
    portion_categories: Vec<Category>,
    status: Option<String>,
}

impl Session {
    pub fn new(store: OrderStore, portion_categories: Vec<Category>) -> Self {
        Self {
            store,
            mode: Mode::Browsing,
            portion_categories,
            status: None,
        }
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn needs_portion(&self, category: Category) -> bool {
        self.portion_categories.contains(&category)
    }

    /// The numbered menu: what each category currently offers, flattened in
    /// display order. Menu number `n` is entry `n - 1`.
    pub fn menu(&self) -> Vec<(Category, &'static Ingredient)> {
        Category::ALL
            .into_iter()
            .flat_map(|c| self.store.menu_items(c).into_iter().map(move |i| (c, i)))
            .collect()
    }

    /// Apply one command and remember its outcome as the status line.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, SessionError> {
        let result = self.dispatch(command);
        self.status = match &result {
            Ok(outcome) => outcome.message(),
            Err(e) => Some(e.to_string()),
        };
        result
    }

    fn dispatch(&mut self, command: Command) -> Result<Outcome, SessionError> {
        match (command, self.mode) {
            (Command::Quit, _) => Ok(Outcome::Quit),
            (Command::Help, _) => Ok(Outcome::Help),

            (Command::Select(n), Mode::Browsing) => {
                let (category, item) = n
                    .checked_sub(1)
                    .and_then(|i| self.menu().get(i).copied())
                    .ok_or(SessionError::NoSuchItem(n))?;
                Ok(self.select(category, item))
            }
            (Command::Remove(n), Mode::Browsing) => {
                let position = n
                    .checked_sub(1)
                    .and_then(|i| self.store.display_positions().get(i).copied())
                    .ok_or(SessionError::NoSuchLine(n))?;
                match self.store.remove(position) {
                    Some(line) => Ok(Outcome::Removed(line.name)),
                    None => Ok(Outcome::Unchanged),
                }
            }
            (Command::Reset, Mode::Browsing) => {
                self.store.clear();
                info!("order reset");
                Ok(Outcome::Reset)
            }
            (Command::Select(_) | Command::Remove(_) | Command::Reset, Mode::ChoosingPortion { .. }) => {
                Err(SessionError::ModalOpen)
            }

            (Command::Portion(portion), Mode::ChoosingPortion { item, .. }) => {
                self.mode = Mode::Browsing;
                let name = self.store.add(item, portion).name.clone();
                Ok(Outcome::Added(name))
            }
            (Command::Portion(_), Mode::Browsing) => Err(SessionError::NoPendingChoice),

            (Command::Cancel, Mode::ChoosingPortion { item, .. }) => {
                debug!(item = item.name, "portion choice cancelled");
                self.mode = Mode::Browsing;
                Ok(Outcome::Cancelled)
            }
            (Command::Cancel, Mode::Browsing) => Ok(Outcome::Unchanged),
        }
    }

    /// Pick an ingredient: portion categories open the modal, everything
    /// else goes straight into the order as a normal portion.
    pub fn select(&mut self, category: Category, item: &'static Ingredient) -> Outcome {
        if self.needs_portion(category) {
            debug!(item = item.name, "waiting for portion");
            self.mode = Mode::ChoosingPortion { category, item };
            Outcome::AwaitingPortion(item.name)
        } else {
            let name = self.store.add(item, Portion::Normal).name.clone();
            Outcome::Added(name)
        }
    }
}
