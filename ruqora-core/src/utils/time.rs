use time::{macros::format_description, OffsetDateTime};

/// Restituisce l'istante corrente in UTC come RFC3339 a larghezza fissa,
/// con millisecondi sempre presenti (es. "2025-11-02T12:34:56.123Z").
/// A larghezza fissa l'ordinamento lessicografico della colonna TEXT
/// created_at coincide con quello cronologico.
pub fn now_timestamp() -> String {
    let format =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    OffsetDateTime::now_utc()
        .format(&format)
        .expect("error formatting timestamp")
}
