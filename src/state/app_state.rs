//! Shared application state

use std::{sync::Arc, time::Instant};

use crate::db::CoffeeStore;

/// State handed to every handler
pub struct AppState {
    /// Data access for the coffee catalog
    pub store: Arc<dyn CoffeeStore>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn CoffeeStore>) -> Self {
        Self {
            store,
            start_time: Instant::now(),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed().as_secs())
    }
}

fn format_uptime(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
