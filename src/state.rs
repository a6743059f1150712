use crate::backend::HttpBackend;
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub backend: HttpBackend,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(backend: HttpBackend) -> Self {
        Self {
            backend,
            session: Arc::new(Mutex::new(Session::new())),
        }
    }
}
