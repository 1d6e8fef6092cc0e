//! Plain-text trip report.

use std::fmt::Write;

use rust_decimal::Decimal;
use tripsplit_core::trip::Trip;
use tripsplit_shared::types::format_amount;

use crate::snapshot::Rejected;

/// Renders the overview, balances, settlements and recent expenses.
pub fn render(trip: &Trip, rejected: &[Rejected], recent_limit: usize) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, trip, rejected, recent_limit);
    out
}

fn write_report(
    out: &mut String,
    trip: &Trip,
    rejected: &[Rejected],
    recent_limit: usize,
) -> std::fmt::Result {
    let overview = trip.overview();
    writeln!(out, "{} ({})", trip.name, trip.currency)?;
    writeln!(out, "  Total expenses: {}", format_amount(overview.total_expenses))?;
    writeln!(out, "  Participants:   {}", overview.participant_count)?;
    writeln!(out, "  Expenses:       {}", overview.expense_count)?;
    writeln!(out, "  Outstanding:    {}", format_amount(overview.outstanding_amount))?;

    let balances = trip.balances();
    let width = balances
        .participants
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);
    writeln!(out)?;
    writeln!(out, "Balances")?;
    for (participant, amount) in balances.iter() {
        writeln!(out, "  {:<width$}  {}", participant.name, describe_balance(amount))?;
    }

    let plan = trip.settlement_plan();
    writeln!(out)?;
    writeln!(out, "Settlements")?;
    if plan.is_settled() {
        writeln!(out, "  All settled up")?;
    }
    for settlement in &plan.settlements {
        writeln!(out, "  {settlement}")?;
    }
    if !plan.unsettled.is_zero() {
        writeln!(out, "  Unsettled remainder: {}", plan.unsettled)?;
    }

    let recent = trip.recent_expenses(recent_limit);
    if !recent.is_empty() {
        writeln!(out)?;
        writeln!(out, "Recent expenses")?;
        for expense in recent {
            let date = expense
                .date
                .map_or_else(|| "----------".to_string(), |d| d.to_string());
            let payer = trip
                .participant(&expense.payer_id)
                .map_or("Unknown", |p| p.name.as_str());
            writeln!(
                out,
                "  {date}  {}  {}  paid by {payer} ({})",
                expense.description,
                format_amount(expense.amount),
                expense.split_type
            )?;
        }
    }

    if !rejected.is_empty() {
        writeln!(out)?;
        writeln!(out, "Skipped expenses")?;
        for r in rejected {
            writeln!(out, "  #{} {}: {}", r.index + 1, r.description, r.error)?;
        }
    }

    Ok(())
}

fn describe_balance(amount: Decimal) -> String {
    let shown = format_amount(amount.abs());
    if shown == "0.00" {
        "settled up".to_string()
    } else if amount.is_sign_positive() {
        format!("gets back {shown}")
    } else {
        format!("owes {shown}")
    }
}
