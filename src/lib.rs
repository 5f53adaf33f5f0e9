//! Conversational note-taking bot.
//!
//! Users add, list and delete short text notes through chat commands. The
//! [`dispatcher::Dispatcher`] routes each inbound message by the owner's
//! conversation [`models::Mode`], the [`service::NoteService`] validates input
//! and talks to a [`db::NoteStore`], and every turn ends with a
//! [`models::Reply`] or is silently ignored.

pub mod api;
pub mod chat;
pub mod config;
pub mod context;
pub mod conversation;
pub mod db;
pub mod dispatcher;
pub mod error;
pub mod models;
pub mod service;
