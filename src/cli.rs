//! Interactive menu
//!
//! The blocking stdin/stdout session: a three-option menu loop plus the
//! prompt helpers that retry on validation errors. Retries are explicit
//! loops so hostile input cannot grow the stack.

use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use tracing::warn;

use crate::chart;
use crate::config::DATE_FORMAT;
use crate::input::{self, ValidationError};
use crate::models::{BpClassification, Upserted, VitalRecord};
use crate::range::{materialize_range, DailySlot};
use crate::store::CsvStore;

/// Run the menu loop until the user exits or stdin closes.
pub fn run(store: &CsvStore) -> io::Result<()> {
    loop {
        println!();
        println!("Please choose from the following options.");
        println!("1. Add new entry.");
        println!("2. View records in a date range.");
        println!("3. Exit");
        let choice = prompt("Press 1, 2 or 3. ")?;

        match choice.as_str() {
            "1" => add_entry(store)?,
            "2" => view_range(store)?,
            "3" => {
                println!("Now leaving the program.");
                return Ok(());
            }
            _ => println!("Invalid entry. Please select 1, 2 or 3"),
        }
    }
}

/// Collect a full record from the prompts and upsert it.
fn add_entry(store: &CsvStore) -> io::Result<()> {
    let date = prompt_date("date or leave blank for today's date", true)?;
    let (bp_sys, bp_dia) = prompt_validated(
        "Please enter your blood pressure as systolic/diastolic, e.g. 120/80: ",
        input::parse_blood_pressure,
    )?;
    println!("{}", BpClassification::classify(bp_sys, bp_dia).advisory());

    let pulse_rate = prompt_validated("Please enter your pulse rate: ", input::parse_pulse_rate)?;
    let weight = prompt_validated("Please enter your weight in pounds: ", input::parse_weight)?;
    let temp = prompt_validated("Please enter your temperature in F: ", input::parse_temp)?;
    let notes = input::parse_notes(&prompt(
        "Are there any notes you would like to add? Leave blank if not: ",
    )?);

    let record = VitalRecord {
        date,
        bp_sys,
        bp_dia,
        pulse_rate,
        weight,
        temp,
        notes,
    };

    match store.upsert(record) {
        Ok(Upserted::Added) => println!("Added new record for {}", date.format(DATE_FORMAT)),
        Ok(Upserted::Updated) => {
            println!("Updated existing record for {}", date.format(DATE_FORMAT))
        }
        Err(err) => {
            warn!(error = %err, "failed to persist vitals record");
            println!("Unable to write to file ({err})");
        }
    }
    Ok(())
}

/// Materialize a date range, print the tail of it, and offer the chart.
fn view_range(store: &CsvStore) -> io::Result<()> {
    let begin = prompt_date("start date", true)?;
    let end = prompt_date("end date", true)?;

    let table = match store.load() {
        Ok(table) => table,
        Err(err) => {
            warn!(error = %err, "failed to load vitals table");
            println!("Unable to read vitals file ({err})");
            return Ok(());
        }
    };

    let slots = materialize_range(&table, begin, end);
    if slots.is_empty() {
        println!("No entries found within given range.");
        return Ok(());
    }

    println!(
        "Here are the most recent 10 entries from {} to {}",
        begin.format(DATE_FORMAT),
        end.format(DATE_FORMAT)
    );
    print_tail(&slots, 10);

    let answer = prompt("Would you like to see a visualization? (y/n): ")?;
    if answer.eq_ignore_ascii_case("y") {
        match chart::render_vitals_chart(
            &slots,
            begin,
            end,
            chart::CHART_WIDTH,
            chart::CHART_HEIGHT,
        ) {
            Ok(png) => {
                let path = store.config().chart_path();
                match std::fs::write(&path, png) {
                    Ok(()) => println!("Chart written to {}", path.display()),
                    Err(err) => println!("Unable to write chart ({err})"),
                }
            }
            Err(err) => println!("Unable to render chart ({err})"),
        }
    }
    Ok(())
}

/// Print the last `limit` daily slots as a fixed-width table.
fn print_tail(slots: &[DailySlot], limit: usize) {
    let start = slots.len().saturating_sub(limit);
    println!(
        "{:<10} {:>6} {:>6} {:>10} {:>6} {:>6}  {}",
        "date", "bp_sys", "bp_dia", "pulse_rate", "weight", "temp", "notes"
    );
    for slot in &slots[start..] {
        let date = slot.date_index.format(DATE_FORMAT).to_string();
        println!(
            "{:<10} {:>6} {:>6} {:>10} {:>6} {:>6.1}  {}",
            date, slot.bp_sys, slot.bp_dia, slot.pulse_rate, slot.weight, slot.temp, slot.notes
        );
    }
}

/// Print a prompt, read one trimmed line. EOF surfaces as an error so the
/// menu loop terminates instead of spinning.
fn prompt(text: &str) -> io::Result<String> {
    print!("{text}");
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(line.trim().to_string())
}

/// Prompt until `parse` accepts the input, printing each rejection.
fn prompt_validated<T>(
    text: &str,
    parse: impl Fn(&str) -> Result<T, ValidationError>,
) -> io::Result<T> {
    loop {
        let raw = prompt(text)?;
        match parse(&raw) {
            Ok(value) => return Ok(value),
            Err(err) => println!("{err}"),
        }
    }
}

/// Prompt for a date. Empty input with `allow_today` offers today's date
/// behind a Y/N confirmation; declining re-prompts.
fn prompt_date(which_date: &str, allow_today: bool) -> io::Result<NaiveDate> {
    loop {
        let raw = prompt(&format!(
            "Please enter the {which_date} in the format mm/dd/yyyy: "
        ))?;

        if raw.is_empty() && allow_today {
            let today = Local::now().date_naive();
            let answer = prompt(&format!(
                "No date entered. Use today's date ({})? (Y/N): ",
                today.format(DATE_FORMAT)
            ))?;
            if answer.eq_ignore_ascii_case("y") {
                return Ok(today);
            }
            continue;
        }

        match input::parse_date(&raw) {
            Ok(date) => return Ok(date),
            Err(err) => println!("{err}"),
        }
    }
}
