//! Implements NavigationPort for the terminal: announces the detail route.

use crate::domain::{DomainError, TutoringId};
use crate::ports::{NavigationPort, detail_route};
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::stdout;
use tracing::info;

pub struct TerminalNavigator;

impl NavigationPort for TerminalNavigator {
    fn navigate_to_detail(&self, tutoring_id: &TutoringId) -> Result<(), DomainError> {
        let route = detail_route(tutoring_id);
        info!(tutoring_id = %tutoring_id, route = %route, "navigate to detail");
        announce(&route).map_err(|e| DomainError::Navigation(e.to_string()))
    }
}

fn announce(route: &str) -> std::io::Result<()> {
    let mut out = stdout();
    out.execute(SetForegroundColor(Color::Rgb { r: 0x64, g: 0xb5, b: 0xf6 }))?;
    out.execute(Print(format!("→ {}\r\n", route)))?;
    out.execute(ResetColor)?;
    Ok(())
}
