use std::io::{stdout, Stdout, Write};

use crossterm::{cursor, terminal, ExecutableCommand, Result};

use super::elevator_status::ElevatorStatus;

// table rows that do not depend on the floor count
const FIXED_ROWS: u16 = 18;

pub struct Debug {
    stdout: Stdout,
    num_floors: u8,
    drawn: bool,
}

impl Debug {
    pub fn new(num_floors: u8) -> Self {
        Debug {
            stdout: stdout(),
            num_floors,
            drawn: false,
        }
    }

    fn status_size(&self) -> u16 {
        FIXED_ROWS + 2 * self.num_floors as u16
    }

    pub fn printstatus(&mut self, status: &ElevatorStatus) -> Result<()> {
        if self.drawn {
            self.stdout.execute(cursor::MoveUp(self.status_size()))?;
        }
        self.stdout.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;
        self.drawn = true;

        writeln!(self.stdout, "+--------------------------------------+")?;
        writeln!(self.stdout, "| PASSENGERS PER FLOOR                 |")?;
        writeln!(self.stdout, "+------------+------------+------------+")?;
        writeln!(self.stdout, "| {0:<10} | {1:<10} | {2:<10} |", "FLOOR", "WAITING", "ONBOARD")?;
        for floor in (0..self.num_floors).rev() {
            let marker = if floor == status.floor { "*" } else { " " };
            writeln!(self.stdout, "+------------+------------+------------+")?;
            writeln!(
                self.stdout,
                "| {0:<9}{1} | {2:<10} | {3:<10} |",
                floor,
                marker,
                status.waiting.get(floor as usize).copied().unwrap_or(0),
                status.onboard.get(floor as usize).copied().unwrap_or(0),
            )?;
        }
        writeln!(self.stdout, "+------------+------------+------------+\n\n")?;

        writeln!(self.stdout, "+-------------------------+")?;
        writeln!(self.stdout, "| STATE MACHINE           |")?;
        writeln!(self.stdout, "+------------+------------+")?;
        writeln!(self.stdout, "| {0:<10} | {1:<10} |", "STATE", status.behaviour.as_string())?;
        writeln!(self.stdout, "+------------+------------+")?;
        writeln!(self.stdout, "| {0:<10} | {1:<10} |", "FLOOR", status.floor)?;
        writeln!(self.stdout, "+------------+------------+")?;
        writeln!(self.stdout, "| {0:<10} | {1:<10} |", "ONBOARD", status.occupancy)?;
        writeln!(self.stdout, "+------------+------------+")?;
        writeln!(self.stdout, "| {0:<10} | {1:<10} |", "PENDING", status.pending)?;
        writeln!(self.stdout, "+------------+------------+")?;

        Ok(())
    }
}
