use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use triage::{Response, Rule, RuleBase, Symptom};

const NO_DIAGNOSIS: &str = "No COVID-19-specific rule was triggered.\nIf symptoms persist, consult a healthcare professional.";
const NO_FIRED_RULES: &str = "(no rules fired)";

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_response(&self, response: &Response) -> String {
        let mut output = String::new();

        let symptoms = if response.symptoms.is_empty() {
            "(none)".to_string()
        } else {
            response
                .symptoms
                .iter()
                .map(|s| s.label())
                .collect::<Vec<_>>()
                .join(", ")
        };
        output.push_str(&format!("Symptoms: {}\n\n", symptoms));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Result").set_alignment(CellAlignment::Left)
        ]));
        if response.has_diagnosis() {
            for diagnosis in &response.diagnoses {
                table.add_row(Row::from(vec![diagnosis]));
            }
        } else {
            table.add_row(Row::from(vec![NO_DIAGNOSIS]));
        }
        output.push_str(&table.to_string());
        output.push('\n');

        output.push_str("\nFired rules:\n");
        if response.fired_rules.is_empty() {
            output.push_str(&format!("  {}\n", NO_FIRED_RULES));
        } else {
            for (i, rule) in response.fired_rules.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, rule));
            }
        }

        output
    }

    pub fn format_rule_base(&self, rules: &RuleBase) -> String {
        if rules.is_empty() {
            return "No rules loaded.\n".to_string();
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Rule").set_alignment(CellAlignment::Left),
            Cell::new("Salience").set_alignment(CellAlignment::Right),
            Cell::new("When").set_alignment(CellAlignment::Left),
            Cell::new("Then").set_alignment(CellAlignment::Left),
        ]));

        for rule in rules.rules() {
            table.add_row(self.rule_row(rule));
        }

        format!("{}\n", table)
    }

    fn rule_row(&self, rule: &Rule) -> Row {
        let conditions = rule
            .conditions
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("\nand ");

        Row::from(vec![
            Cell::new(&rule.name),
            Cell::new(rule.salience).set_alignment(CellAlignment::Right),
            Cell::new(conditions),
            Cell::new(rule.conclusion.to_string()),
        ])
    }

    pub fn format_help(&self) -> String {
        let mut output = String::new();
        output.push_str("Rules fire when every condition is present; all eligible rules fire,\n");
        output.push_str("highest salience first, then in the order they were declared.\n\n");
        output.push_str("These are *example* rules only and NOT a medical diagnosis tool.\n");
        output.push_str("If you or someone is unwell, consult a qualified healthcare professional.\n");
        output
    }

    pub fn format_symptoms(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Symptom").set_alignment(CellAlignment::Left),
            Cell::new("Label").set_alignment(CellAlignment::Left),
        ]));

        for symptom in Symptom::ALL {
            table.add_row(Row::from(vec![symptom.as_str(), symptom.label()]));
        }

        format!("{}\n", table)
    }

    pub fn format_check_summary(&self, file_count: usize, rules: &RuleBase) -> String {
        let mut output = String::new();

        let file_word = if file_count == 1 { "file" } else { "files" };
        let rule_word = if rules.len() == 1 { "rule" } else { "rules" };
        output.push_str(&format!(
            "OK: {} {}, {} {}\n",
            file_count,
            file_word,
            rules.len(),
            rule_word
        ));

        if !rules.is_empty() {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(Row::from(vec![
                Cell::new("Rule").set_alignment(CellAlignment::Left),
                Cell::new("Conditions").set_alignment(CellAlignment::Right),
                Cell::new("Line").set_alignment(CellAlignment::Right),
            ]));

            for rule in rules.rules() {
                let line = rule
                    .span
                    .as_ref()
                    .map(|s| s.line.to_string())
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(Row::from(vec![
                    Cell::new(&rule.name),
                    Cell::new(rule.conditions.len()).set_alignment(CellAlignment::Right),
                    Cell::new(line).set_alignment(CellAlignment::Right),
                ]));
            }

            output.push_str(&format!("{}\n", table));
        }

        output
    }
}
