//! Rendered frame: link list plus the current view, as text or JSON.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::router::Location;
use crate::ui::app::LinkId;
use crate::ui::route::View;

/// One rendered link in the navigation list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkLine {
    pub link: LinkId,
    pub text: String,
    pub loading: bool,
}

/// Everything the demo shows at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub location: Location,
    pub links: Vec<LinkLine>,
    pub view: View,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.links {
            writeln!(f, "* {}", line.text)?;
        }
        writeln!(f, "{}", "-".repeat(32))?;
        writeln!(f, "Location: {}", self.location)?;
        write!(f, "{}", self.view)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Home => writeln!(f, "Home"),
            View::Loading => writeln!(f, "Loading..."),
            View::NotFound { path } => writeln!(f, "No page at {}", path),
            View::Data(result) => {
                writeln!(f, "Loaded at {}", clock_time(result.retrieved_at))?;
                for item in &result.items {
                    writeln!(f, "  - {}", item)?;
                }
                Ok(())
            }
        }
    }
}

/// `HH:MM:SS UTC` for a wall-clock timestamp.
fn clock_time(at: SystemTime) -> String {
    let secs = at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let of_day = secs % 86_400;
    format!(
        "{:02}:{:02}:{:02} UTC",
        of_day / 3600,
        (of_day % 3600) / 60,
        of_day % 60
    )
}
