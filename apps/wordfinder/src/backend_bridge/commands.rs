//! Backend commands queued from the UI loop to the backend worker.

use shared::protocol::WordQuery;

#[derive(Debug)]
pub enum BackendCommand {
    Lookup {
        query: WordQuery,
        group_field: Option<String>,
    },
    Shutdown,
}
