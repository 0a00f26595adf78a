//! Unit tests for the patchbay engines and their supporting modules.

mod cable_tests;
mod settings_watcher_tests;
mod snapshot_tests;
mod viewport_tests;
