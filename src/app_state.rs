use crate::database::AccountRepository;

pub struct AppState {
    pub db: Box<dyn AccountRepository>,
}
