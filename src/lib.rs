//! A personal contact book.
//!
//! [`ContactStore`](domain::ContactStore) owns the collection and persists it
//! to a [`KeyValueStorage`](storage::KeyValueStorage) slot after every change.
//! [`ContactBook`](book::ContactBook) drives the store on behalf of a
//! [`Presenter`](presenter::Presenter), the way a form-based front end would.

pub mod book;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod prelude;
pub mod presenter;
pub mod storage;
