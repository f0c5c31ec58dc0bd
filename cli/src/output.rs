use anyhow::Result;
use focal_lib::domains::Domain;
use focal_lib::masked_numbers::MaskedNumber;
use focal_lib::number_groups::NumberGroup;
use focal_lib::operations::OperationKind;
use focal_lib::ranges::PRange;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// The result of one operation, ready for display
#[derive(Debug)]
pub struct Outcome {
    pub label: String,
    pub kind: OperationKind,
    pub result: NumberGroup,
    pub values: Vec<PRange>,

    // Boolean results only, None when empty
    pub mask: Option<MaskedNumber>,
}

impl Outcome {
    pub fn new(
        domain: &Domain,
        label: String,
        kind: OperationKind,
        result: NumberGroup,
    ) -> Result<Self> {
        let values = result
            .iter()
            .map(|(focal, polarity)| domain.get_value_of(&focal, polarity))
            .collect::<Result<Vec<_>, _>>()?;
        let mask = match kind.group_op() {
            Some(_) if !result.is_empty() => Some(result.to_masked()?),
            Some(_) | None => None,
        };
        Ok(Outcome {
            label,
            kind,
            result,
            values,
            mask,
        })
    }

    /// False when a boolean or comparison found nothing
    pub fn matched(&self) -> bool {
        !self.result.is_empty()
    }
}

/// One row per member of each result
pub fn outcome_table(outcomes: &[Outcome], show_mask: bool) -> String {
    let mut builder = Builder::default();
    let mut headers = vec!["operation", "#", "focal", "polarity", "value"];
    if show_mask {
        headers.push("mask");
    }
    builder.push_record(headers);

    for outcome in outcomes {
        let mask = outcome
            .mask
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        if !outcome.matched() {
            let mut row = vec![
                outcome.label.clone(),
                String::new(),
                "false".to_string(),
                String::new(),
                String::new(),
            ];
            if show_mask {
                row.push(mask.clone());
            }
            builder.push_record(row);
        }
        for (idx, ((focal, polarity), value)) in
            outcome.result.iter().zip(&outcome.values).enumerate()
        {
            let mut row = vec![
                if idx == 0 {
                    outcome.label.clone()
                } else {
                    String::new()
                },
                (idx + 1).to_string(),
                focal.to_string(),
                polarity.to_string(),
                value.to_string(),
            ];
            if show_mask {
                row.push(if idx == 0 { mask.clone() } else { String::new() });
            }
            builder.push_record(row);
        }
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// Name and symbol of every operation
pub fn operations_table() -> String {
    let mut builder = Builder::default();
    builder.push_record(["operation", "family"]);
    for op in OperationKind::all() {
        let family = match op {
            OperationKind::Arithmetic(_) => "arithmetic",
            OperationKind::Bool(_) => "boolean",
            OperationKind::Compare(_) => "comparison",
        };
        builder.push_record([op.name(), family]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod test {
    use crate::output::{operations_table, outcome_table, Outcome};
    use focal_intervals::{BoolOp, DirectedInterval};
    use focal_lib::domains::{Domain, DomainSettings};
    use focal_lib::ids::Ids;
    use focal_lib::number_groups::NumberGroup;
    use focal_lib::operations::OperationKind;
    use focal_lib::polarities::Polarity;

    #[test]
    fn test_outcome_table() {
        let mut ids = Ids::default();
        let domain = Domain::new(
            &mut ids,
            DomainSettings::new(
                DirectedInterval::new(0, 10),
                DirectedInterval::new(-100, 100),
            ),
        );
        let mut result = NumberGroup::default();
        result.add(DirectedInterval::new(10, 15), Polarity::Aligned);
        result.add(DirectedInterval::new(20, 25), Polarity::Aligned);
        let xor = Outcome::new(
            &domain,
            "a xor b".to_string(),
            OperationKind::Bool(BoolOp::Xor),
            result,
        )
        .unwrap();
        assert!(xor.matched());
        assert_eq!(
            xor.mask.as_ref().map(ToString::to_string),
            Some("10 T 15 F 20 T 25 aligned".to_string())
        );

        let never = Outcome::new(
            &domain,
            "a never b".to_string(),
            OperationKind::Bool(BoolOp::Never),
            NumberGroup::default(),
        )
        .unwrap();
        assert!(!never.matched());
        assert!(never.mask.is_none());

        let output = outcome_table(&[xor, never], true);
        assert!(output.contains("a xor b"));
        assert!(output.contains("[20 -> 25]"));
        assert!(output.contains("2.5"));
        assert!(output.contains("false"));
        assert!(output.contains("10 T 15 F 20 T 25"));
    }

    #[test]
    fn test_operations_table() {
        let output = operations_table();
        assert!(output.contains("b_inhibits_a"));
        assert!(output.contains("greater_than_and_equal"));
        assert!(output.contains("pow"));
    }
}
