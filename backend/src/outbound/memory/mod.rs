//! Process-local repositories used when no database is configured.
//!
//! State lives behind a `std::sync::Mutex`; every check-and-write happens
//! under one lock so uniqueness holds across concurrent requests. Data is
//! lost on restart.

mod saved_book_repository;
mod user_repository;

pub use saved_book_repository::InMemorySavedBookRepository;
pub use user_repository::InMemoryUserRepository;

use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Every critical section leaves the map consistent, so a poisoned lock
    // is still safe to read.
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
