// Czytelnia state managers
// Managers hold the stateful views over stories: the library list/detail models and the read-status set.

pub mod library_manager;
pub mod read_status_manager;
