use crate::flyover::PassResolver;

pub struct AppState {
    pub resolver: PassResolver,
    /// Zone for `rise_local` when the request gives none.
    pub default_tz: String,
}
