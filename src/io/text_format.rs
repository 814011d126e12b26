//! Human-readable balance summary

use crate::types::{Balances, ExpenseError};
use rust_decimal::Decimal;
use std::io::Write;

/// One line per person: who is owed, who owes, who is settled
pub fn write_balances_text(balances: &Balances, output: &mut dyn Write) -> Result<(), ExpenseError> {
    for (person, amount) in balances {
        if *amount > Decimal::ZERO {
            writeln!(output, "{} is owed {:.2}", person, amount)?;
        } else if *amount < Decimal::ZERO {
            writeln!(output, "{} owes {:.2}", person, amount.abs())?;
        } else {
            writeln!(output, "{} is settled", person)?;
        }
    }
    output.flush()?;
    Ok(())
}
