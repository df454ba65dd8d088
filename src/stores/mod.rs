//! Contains traits and implementations for objects that store the domain
//! [models](crate::models) and [settings](crate::settings).

mod ledger;
mod settings;

pub mod sqlite;

pub use ledger::LedgerStore;
pub use settings::SettingsStore;
