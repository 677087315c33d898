use std::collections::BTreeSet;

use anyhow::{Context, Result};

use clockface::picker::disabled::{DisabledTimeSpec, IntervalBound};
use clockface::picker::model::{ClockType, Meridiem, format_time_text, format_two_digit};
use clockface::script::SessionScript;

pub fn run_diagnostics(script: &SessionScript) -> Result<()> {
    let config = &script.config;
    let clock_type = config.clock_type;
    config.validate().context("invalid picker configuration")?;
    let seed = script.seed().context("invalid seed")?;
    let spec = DisabledTimeSpec::from_options(&script.disabled_time, clock_type)
        .context("invalid disabled time")?;

    println!("clockface diagnostics");
    println!("Clock type: {clock_type}");
    println!(
        "Increments: hours={} minutes={}",
        config.increment_hours, config.increment_minutes
    );
    println!(
        "Switch to minutes after hour: {}",
        config.switch_to_minutes_after_select_hour
    );
    println!("Editable: {}", config.editable());
    println!("Dial diameter: {:.1}", config.dial_diameter);
    println!(
        "Seed: {}",
        format_time_text(seed.hour, seed.minute, seed.meridiem)
    );

    let Some(spec) = spec else {
        println!("Disabled time: none");
        println!("Steps: {}", script.steps.len());
        return Ok(());
    };

    match &spec {
        DisabledTimeSpec::Simple(simple) => {
            println!(
                "Disabled time: {} hour entries, {} minute entries",
                simple.hours().len(),
                simple.minutes().len()
            );
            println!("Disabled minutes: {}", tick_list(simple.minutes()));
        }
        DisabledTimeSpec::Interval(interval) => {
            println!(
                "Disabled time: interval {} - {}",
                bound_text(interval.start()),
                bound_text(interval.end())
            );
            println!(
                "  Start hour {} masks minutes: {}",
                format_two_digit(interval.start().hour),
                tick_list(interval.start_minutes())
            );
            println!(
                "  End hour {} masks minutes: {}",
                format_two_digit(interval.end().hour),
                tick_list(interval.end_minutes())
            );
        }
    }

    let contexts: &[Option<Meridiem>] = match clock_type {
        ClockType::Hour12 => &[Some(Meridiem::Am), Some(Meridiem::Pm)],
        ClockType::Hour24 => &[None],
    };
    for &meridiem in contexts {
        let label = meridiem.map_or("24h", Meridiem::label);
        println!(
            "Disabled hours ({label}): {}",
            tick_list(&spec.disabled_hours(clock_type, meridiem))
        );
    }
    println!("Steps: {}", script.steps.len());
    Ok(())
}

fn bound_text(bound: IntervalBound) -> String {
    format_time_text(bound.hour, bound.minute, bound.meridiem)
}

fn tick_list(ticks: &BTreeSet<u8>) -> String {
    if ticks.is_empty() {
        return "-".to_string();
    }
    ticks
        .iter()
        .map(|tick| format_two_digit(*tick))
        .collect::<Vec<_>>()
        .join(" ")
}
