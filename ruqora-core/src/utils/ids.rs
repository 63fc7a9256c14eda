use uuid::Uuid;

/// Genera un nuovo id univoco (UUIDv4) come stringa.
/// Usato per utenti, domande, risposte e token di sessione.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
