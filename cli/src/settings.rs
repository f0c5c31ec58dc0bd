use anyhow::{Context, Result};
use clap::{arg, Arg, ArgMatches};
use focal_intervals::DirectedInterval;
use focal_lib::domains::DomainSettings;
use focal_lib::operations::OperationKind;
use focal_lib::polarities::Polarity;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse "start,end" into an interval
pub fn parse_interval(value: &str) -> Result<DirectedInterval, String> {
    let (start, end) = value
        .split_once(',')
        .ok_or_else(|| format!("expected START,END, got '{value}'"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<i64>()
            .map_err(|e| format!("invalid tick '{s}': {e}"))
    };
    Ok(DirectedInterval::new(parse(start)?, parse(end)?))
}

pub fn parse_operation(value: &str) -> Result<OperationKind, String> {
    OperationKind::from_name(value).ok_or_else(|| {
        format!("unknown operation '{value}', see `focal operations`")
    })
}

pub fn parse_polarity(value: &str) -> Result<Polarity, String> {
    match value.to_lowercase().as_str() {
        "aligned" | "+" => Ok(Polarity::Aligned),
        "inverted" | "-" => Ok(Polarity::Inverted),
        "none" => Ok(Polarity::None),
        "unknown" => Ok(Polarity::Unknown),
        _ => Err(format!("unknown polarity '{value}'")),
    }
}

pub fn parse_decimal(value: &str) -> Result<Decimal, String> {
    Decimal::from_str(value.trim()).map_err(|e| format!("'{value}': {e}"))
}

pub struct EvalSettings {
    pub domain: DomainSettings,

    pub left: DirectedInterval,
    pub left_polarity: Polarity,

    // Unary operations have no right operand
    pub right: Option<DirectedInterval>,
    pub right_polarity: Polarity,

    pub operation: OperationKind,

    // Value of the repeats number, one if unset
    pub repeats: Option<Decimal>,

    // Also show boolean results as a run-length mask
    pub show_mask: bool,
}

impl EvalSettings {
    /// Return the command line switches for `focal eval`
    pub fn cli() -> impl IntoIterator<Item = Arg> {
        [
            arg!(--basis [INTERVAL] "Unit of the domain, as START,END")
                .value_parser(parse_interval)
                .allow_hyphen_values(true)
                .default_value("0,10"),
            arg!(--"min-max" [INTERVAL] "Working range of the domain")
                .value_parser(parse_interval)
                .allow_hyphen_values(true)
                .default_value("-1000,1000"),
            arg!(--reciprocal "One tick is worth the length of the basis"),
            arg!(--left <INTERVAL> "Left operand, as START,END")
                .value_parser(parse_interval)
                .allow_hyphen_values(true),
            arg!(--"left-polarity" [POLARITY] "aligned, inverted, none or unknown")
                .value_parser(parse_polarity)
                .allow_hyphen_values(true)
                .default_value("aligned"),
            arg!(--right [INTERVAL] "Right operand, as START,END")
                .value_parser(parse_interval)
                .allow_hyphen_values(true),
            arg!(--"right-polarity" [POLARITY] "aligned, inverted, none or unknown")
                .value_parser(parse_polarity)
                .allow_hyphen_values(true)
                .default_value("aligned"),
            arg!(--op <OPERATION> "Name or symbol of the operation")
                .value_parser(parse_operation)
                .allow_hyphen_values(true),
            arg!(--repeats [VALUE] "How many times the right operand applies")
                .value_parser(parse_decimal)
                .allow_hyphen_values(true),
            arg!(--mask "Also show boolean results as a mask"),
        ]
    }

    pub fn new(args: &ArgMatches) -> Result<Self> {
        let basis = *args
            .get_one::<DirectedInterval>("basis")
            .context("missing --basis")?;
        let min_max = *args
            .get_one::<DirectedInterval>("min-max")
            .context("missing --min-max")?;
        Ok(EvalSettings {
            domain: DomainSettings::new(basis, min_max)
                .with_name("eval")
                .reciprocal(args.get_flag("reciprocal")),
            left: *args
                .get_one::<DirectedInterval>("left")
                .context("missing --left")?,
            left_polarity: args
                .get_one::<Polarity>("left-polarity")
                .copied()
                .unwrap_or_default(),
            right: args.get_one::<DirectedInterval>("right").copied(),
            right_polarity: args
                .get_one::<Polarity>("right-polarity")
                .copied()
                .unwrap_or_default(),
            operation: *args
                .get_one::<OperationKind>("op")
                .context("missing --op")?,
            repeats: args.get_one::<Decimal>("repeats").copied(),
            show_mask: args.get_flag("mask"),
        })
    }
}
