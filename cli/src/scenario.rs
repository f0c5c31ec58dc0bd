use crate::output::Outcome;
use crate::settings::{parse_decimal, parse_operation, parse_polarity};
use anyhow::{Context, Result};
use focal_intervals::DirectedInterval;
use focal_lib::domains::DomainSettings;
use focal_lib::ids::{DomainId, NumberId};
use focal_lib::polarities::Polarity;
use focal_lib::ranges::PRange;
use focal_lib::workspaces::Workspace;
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct DomainEntry {
    #[serde(default)]
    pub name: String,
    pub basis: (i64, i64),

    // Defaults to the usual working range
    pub min_max: Option<(i64, i64)>,

    #[serde(default)]
    pub reciprocal: bool,
}

impl DomainEntry {
    fn settings(&self) -> DomainSettings {
        let min_max = match self.min_max {
            Some((start, end)) => DirectedInterval::new(start, end),
            None => DomainSettings::default().min_max,
        };
        DomainSettings::new(
            DirectedInterval::new(self.basis.0, self.basis.1),
            min_max,
        )
        .with_name(&self.name)
        .reciprocal(self.reciprocal)
    }
}

#[derive(Debug, Deserialize)]
pub struct NumberEntry {
    pub name: String,
    pub focal: (i64, i64),
    pub polarity: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OperationEntry {
    pub op: String,
    pub left: String,
    pub right: Option<String>,

    // Either the name of a number, or a decimal literal
    pub repeats: Option<String>,

    // Store the result as a new number with that name
    pub into: Option<String>,
}

/// A domain, a few named numbers, and the operations to run on them, in
/// order.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub domain: DomainEntry,

    #[serde(default)]
    pub numbers: Vec<NumberEntry>,

    #[serde(default)]
    pub operations: Vec<OperationEntry>,
}

fn lookup(names: &HashMap<String, NumberId>, name: &str) -> Result<NumberId> {
    names.get(name).copied().with_context(|| {
        format!(
            "no number named '{name}' (known: {})",
            names.keys().sorted().join(", ")
        )
    })
}

/// Hold a literal repeats value in a new number of the domain.  The value
/// is rounded to whole ticks, which is reported when it changes it.
pub fn create_repeats(
    workspace: &mut Workspace,
    domain: DomainId,
    repeats: Decimal,
) -> Result<NumberId> {
    let id = workspace.create_number_from_range(
        domain,
        &PRange::real(repeats),
        Polarity::Aligned,
    )?;
    let stored = workspace.value(domain, id)?.end;
    if stored != repeats {
        log::warn!(
            "repeats {repeats} is not a whole number of ticks, using {}",
            stored.normalize()
        );
    }
    Ok(id)
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid scenario")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("while loading {}", path.display()))
    }

    /// Run every operation, and return their outcomes in order
    pub fn run(&self) -> Result<Vec<Outcome>> {
        let mut workspace = Workspace::default();
        let domain = workspace.create_domain(self.domain.settings());
        let mut names: HashMap<String, NumberId> = HashMap::new();

        for number in &self.numbers {
            let polarity = match &number.polarity {
                Some(p) => parse_polarity(p).map_err(anyhow::Error::msg)?,
                None => Polarity::default(),
            };
            let id = workspace.create_number(
                domain,
                DirectedInterval::new(number.focal.0, number.focal.1),
                polarity,
            )?;
            names.insert(number.name.clone(), id);
        }

        let mut outcomes = Vec::with_capacity(self.operations.len());
        for entry in &self.operations {
            let outcome = self
                .run_one(&mut workspace, domain, &mut names, entry)
                .with_context(|| format!("in operation '{}'", entry.op))?;
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    fn run_one(
        &self,
        workspace: &mut Workspace,
        domain: DomainId,
        names: &mut HashMap<String, NumberId>,
        entry: &OperationEntry,
    ) -> Result<Outcome> {
        let kind = parse_operation(&entry.op).map_err(anyhow::Error::msg)?;
        let left = lookup(names, &entry.left)?;
        let right = entry
            .right
            .as_deref()
            .map(|r| lookup(names, r))
            .transpose()?;

        // A literal repeats value lives in a temporary number
        let (repeats, temporary) = match entry.repeats.as_deref() {
            None => (None, false),
            Some(r) => match names.get(r) {
                Some(id) => (Some(*id), false),
                None => {
                    let k = parse_decimal(r).map_err(anyhow::Error::msg)?;
                    (Some(create_repeats(workspace, domain, k)?), true)
                }
            },
        };

        let result =
            workspace.apply_operation(domain, left, right, kind, repeats);
        if let (Some(id), true) = (repeats, temporary) {
            workspace.remove_number(domain, id);
        }
        let result = result?;

        let mut label = match &entry.right {
            Some(r) => format!("{} {} {}", entry.left, kind, r),
            None => format!("{} {}", kind, entry.left),
        };
        if let Some(r) = &entry.repeats {
            label.push_str(&format!(" x{r}"));
        }
        log::info!("{label} => {result}");

        if let Some(into) = &entry.into {
            let (d, ids) = workspace.domain_and_ids(domain)?;
            let id = match result.get(0) {
                Some((focal, polarity)) if result.count() == 1 => {
                    d.create_number(ids, focal, polarity)
                }
                Some(_) | None => d.create_group(ids, result.clone()),
            };
            names.insert(into.clone(), id);
        }

        Outcome::new(workspace.domain(domain)?, label, kind, result)
    }
}
