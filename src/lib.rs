/// Account identifiers and the balance rules of a single account.
pub mod account;

/// Transfer requests, validated before they reach the store.
pub mod command;

/// Transactional account store interface, plus "in memory" implementation.
///
/// NOTE: the service only ever talks to the trait, so a database backed
/// store can be slotted in without touching transfer logic.
pub mod store;

/// Atomic funds transfer between two accounts.
pub mod service;

/// CSV fixture loading and batch running used by the `teller` binary.
/// Kept in the library so integration tests can drive the same code path.
pub mod bin_utils;
