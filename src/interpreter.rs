use crate::cells::{extract_number, split_cells};
use crate::schema::IncomeStatementRecord;
use crate::tables::TableBlock;
use once_cell::sync::Lazy;
use regex::Regex;

/// Column used when no header looks like a fiscal period. Column 0 holds the row labels.
pub const DEFAULT_PERIOD_COLUMN: usize = 1;

pub const FALLBACK_PERIOD_LABEL: &str = "LatestQuarter";

static FISCAL_PERIOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:Q\d\s*FY\d+|FY\d+Q\d)").unwrap());

/// How a submitted net income is compared with the parsed one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Reconciliation {
    /// Exact floating point equality.
    #[default]
    Exact,
    /// Absolute difference strictly below the tolerance.
    Tolerance(f64),
}

impl Reconciliation {
    pub fn from_tolerance(tolerance: Option<f64>) -> Self {
        tolerance.map_or(Reconciliation::Exact, Reconciliation::Tolerance)
    }

    pub fn matches(&self, submitted: f64, parsed: f64) -> bool {
        match self {
            Reconciliation::Exact => submitted == parsed,
            Reconciliation::Tolerance(tolerance) => (submitted - parsed).abs() < *tolerance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineItem {
    Revenues,
    Expenses,
    NetIncome,
}

/// Classifies a row. `total income from operations` and `profit after tax margin` rows
/// are different line items and must not match.
fn classify(line: &str) -> Option<LineItem> {
    let lower = line.to_lowercase();
    if lower.contains("total income") && !lower.contains("operations") {
        Some(LineItem::Revenues)
    } else if lower.contains("total expenses") {
        Some(LineItem::Expenses)
    } else if lower.contains("profit after tax") && !lower.contains("margin") {
        Some(LineItem::NetIncome)
    } else {
        None
    }
}

/// Index of the first header naming a fiscal quarter (`Q3 FY25`, `FY25Q3`), else column 1.
pub fn latest_period_index(headers: &[&str]) -> usize {
    headers
        .iter()
        .position(|h| FISCAL_PERIOD_RE.is_match(h))
        .unwrap_or(DEFAULT_PERIOD_COLUMN)
}

/// Rounds to two decimals from the exact binary value, so ties round to even.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Builds a record from one table block. Never fails: a block without usable rows yields
/// an all-zero record, which the pipeline then drops.
pub fn interpret(
    block: &TableBlock,
    submitted_net_income: Option<f64>,
    reconciliation: Reconciliation,
) -> IncomeStatementRecord {
    let headers = block.header().map(split_cells).unwrap_or_default();
    let latest = latest_period_index(&headers);
    let quarter = headers
        .get(latest)
        .copied()
        .unwrap_or(FALLBACK_PERIOD_LABEL);

    let mut record = IncomeStatementRecord::empty(quarter, submitted_net_income);

    for line in block.rows() {
        match classify(line) {
            Some(LineItem::Revenues) => record.revenues = extract_number(line, latest),
            Some(LineItem::Expenses) => record.expenses = extract_number(line, latest),
            Some(LineItem::NetIncome) => record.net_income = extract_number(line, latest),
            None => {}
        }
    }

    record.gross_profit = record.revenues - record.expenses;
    if record.revenues > 0.0 {
        record.profit_margin_percent = round2(record.net_income / record.revenues * 100.0);
    }

    if let Some(submitted) = submitted_net_income {
        record.calculated_net_income = record.net_income;
        record.is_valid = Some(reconciliation.matches(submitted, record.net_income));
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> TableBlock {
        TableBlock::new(lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn test_picks_quarter_column_and_line_items() {
        let table = block(&[
            "| Particulars | Q2 FY25 | Q3 FY25 | Q3 FY24 |",
            "|---|---|---|---|",
            "| Total Income from operations | 9,000 | 9,500 | 8,000 |",
            "| Total Income | 10,000 | 12,000 | 9,000 |",
            "| Total Expenses | 6,000 | 7,000 | 5,500 |",
            "| Profit after tax | 3,000 | 3,834 | 2,800 |",
            "| Profit after tax margin % | 30.0 | 31.9 | 31.1 |",
        ]);

        let record = interpret(&table, Some(3000.0), Reconciliation::Exact);
        assert_eq!(record.quarter, "Q2 FY25");
        assert_eq!(record.revenues, 10_000.0);
        assert_eq!(record.expenses, 6_000.0);
        assert_eq!(record.net_income, 3_000.0);
        assert_eq!(record.gross_profit, 4_000.0);
        assert_eq!(record.profit_margin_percent, 30.0);
        assert_eq!(record.calculated_net_income, 3_000.0);
        assert_eq!(record.is_valid, Some(true));
    }

    #[test]
    fn test_compact_period_header() {
        let headers = vec!["Item", "Half year", "fy25q3"];
        assert_eq!(latest_period_index(&headers), 2);
        let headers = vec!["Item", "Current", "Previous"];
        assert_eq!(latest_period_index(&headers), DEFAULT_PERIOD_COLUMN);
        // the pattern is anchored at the start of the header
        let headers = vec!["Item", "Audited Q3 FY25"];
        assert_eq!(latest_period_index(&headers), DEFAULT_PERIOD_COLUMN);
    }

    #[test]
    fn test_margin_and_gross_profit() {
        let table = block(&[
            "| Item | Q4 FY24 |",
            "| Total income | 5,000 |",
            "| Total expenses | 3,750.25 |",
            "| Profit after tax | 1,000 |",
        ]);
        let record = interpret(&table, None, Reconciliation::Exact);
        assert_eq!(record.profit_margin_percent, 20.0);
        assert_eq!(record.gross_profit, 5_000.0 - 3_750.25);
        assert_eq!(record.is_valid, None);
        assert_eq!(record.calculated_net_income, 0.0);
        assert_eq!(record.submitted_net_income, None);
    }

    #[test]
    fn test_margin_is_rounded_to_two_decimals() {
        let table = block(&[
            "| Item | Q1 FY25 |",
            "| Total income | 3 |",
            "| Profit after tax | 1 |",
        ]);
        let record = interpret(&table, None, Reconciliation::Exact);
        assert_eq!(record.profit_margin_percent, 33.33);
    }

    #[test]
    fn test_margin_ties_round_to_even() {
        let table = block(&[
            "| Item | Q1 FY25 |",
            "| Total income | 8,000 |",
            "| Profit after tax | 10 |",
        ]);
        let record = interpret(&table, None, Reconciliation::Exact);
        assert_eq!(record.profit_margin_percent, 0.12);

        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(0.625), 0.62);
        assert_eq!(round2(-0.125), -0.12);
    }

    #[test]
    fn test_exact_equality_is_strict() {
        let table = block(&["| Item | Q3 FY25 |", "| Profit after tax | 3,834.5 |"]);
        let record = interpret(&table, Some(3834.0), Reconciliation::Exact);
        assert_eq!(record.is_valid, Some(false));

        let table = block(&["| Item | Q3 FY25 |", "| Profit after tax | 3,834.0 |"]);
        let record = interpret(&table, Some(3834.0), Reconciliation::Exact);
        assert_eq!(record.is_valid, Some(true));
    }

    #[test]
    fn test_tolerance_accepts_rounding_noise() {
        let table = block(&["| Item | Q3 FY25 |", "| Profit after tax | 3,834.004 |"]);
        let record = interpret(&table, Some(3834.0), Reconciliation::Tolerance(0.01));
        assert_eq!(record.is_valid, Some(true));

        let record = interpret(&table, Some(3830.0), Reconciliation::Tolerance(0.01));
        assert_eq!(record.is_valid, Some(false));
    }

    #[test]
    fn test_header_only_block_yields_zero_record() {
        let table = block(&["| Total income | Total expenses | Profit after tax |"]);
        let record = interpret(&table, Some(1.0), Reconciliation::Exact);
        assert_eq!(record.quarter, "Total expenses");
        assert_eq!(record.net_income, 0.0);
        assert!(!record.is_reportable());
        assert_eq!(record.is_valid, Some(false));
    }

    #[test]
    fn test_missing_period_column_uses_fallback_label() {
        let table = block(&["| Particulars |", "| Profit after tax | 12 |"]);
        let record = interpret(&table, None, Reconciliation::Exact);
        assert_eq!(record.quarter, FALLBACK_PERIOD_LABEL);
        assert_eq!(record.net_income, 12.0);
    }

    #[test]
    fn test_later_rows_overwrite_earlier_ones() {
        let table = block(&[
            "| Item | Q1 FY25 |",
            "| Profit after tax (standalone) | 10 |",
            "| Profit after tax (consolidated) | 15 |",
        ]);
        let record = interpret(&table, None, Reconciliation::Exact);
        assert_eq!(record.net_income, 15.0);
    }
}
