pub mod ids;
pub mod time;

// Re-export per comodità
pub use ids::new_id;
pub use time::now_timestamp;
